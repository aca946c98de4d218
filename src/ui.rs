use crate::calc::GRID_EMISSION_FACTOR;

pub fn render_index(year: i32) -> String {
    INDEX_HTML
        .replace("{{YEAR}}", &year.to_string())
        .replace("{{GRID_FACTOR}}", &GRID_EMISSION_FACTOR.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>CO2 Emission Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef6ec;
      --bg-2: #cfe8cf;
      --ink: #24302a;
      --accent: #2d7a4b;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4f2e0 60%, #f2f8ef 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5c6a60;
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7f8b82;
    }

    .stat .value {
      display: block;
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.co2 {
      color: var(--accent);
    }

    .forms {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
      gap: 16px;
    }

    form.card {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
    }

    form.card h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
      color: #5c6a60;
    }

    input, select {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 10px;
      padding: 10px;
      font-size: 1rem;
      font-family: inherit;
    }

    .preview {
      font-size: 0.95rem;
      color: var(--accent);
      font-weight: 600;
      min-height: 1.2em;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.link {
      background: transparent;
      color: var(--accent-2);
      padding: 4px 8px;
      font-size: 0.85rem;
      text-decoration: underline;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: white;
      border-radius: 16px;
      overflow: hidden;
      font-size: 0.92rem;
    }

    th, td {
      text-align: left;
      padding: 10px 12px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    th {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #7f8b82;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      width: fit-content;
      margin-bottom: 12px;
    }

    .tab {
      background: transparent;
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.9rem;
      color: #6b645d;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    #chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-bar {
      fill: var(--accent);
      opacity: 0.85;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>CO2 Emission Tracker</h1>
      <p class="subtitle">Record electricity and travel fuel use, watch your footprint.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Total CO2 (kg)</span>
        <span class="value co2" id="total-co2">0</span>
      </div>
      <div class="stat">
        <span class="label">Records</span>
        <span class="value" id="record-count">0</span>
      </div>
      <div class="stat">
        <span class="label">Most used fuel</span>
        <span class="value" id="most-used-fuel">--</span>
      </div>
      <div class="stat">
        <span class="label">Quarter avg (kg/month)</span>
        <span class="value" id="quarter-avg">0</span>
      </div>
      <div class="stat">
        <span class="label">Vs last month</span>
        <span class="value" id="reduction">--</span>
      </div>
    </section>

    <section class="forms">
      <form class="card" id="energy-form">
        <h2>Electricity</h2>
        <input type="hidden" id="energy-id" />
        <label>Date
          <input type="date" id="energy-date" required />
        </label>
        <label>kWh consumed
          <input type="number" step="any" id="energy-kwh" required />
        </label>
        <div class="preview" id="energy-preview">CO2: 0 kg</div>
        <button type="submit">Save energy record</button>
      </form>

      <form class="card" id="fuel-form">
        <h2>Travel fuel</h2>
        <input type="hidden" id="fuel-record-id" />
        <label>Date
          <input type="date" id="fuel-date" required />
        </label>
        <label>Km traveled
          <input type="number" step="any" id="fuel-km" required />
        </label>
        <label>Efficiency (km/liter)
          <input type="number" step="any" id="fuel-efficiency" required />
        </label>
        <label>Fuel
          <select id="fuel-select"></select>
        </label>
        <div class="preview" id="fuel-preview">CO2: 0 kg</div>
        <button type="submit">Save fuel record</button>
      </form>
    </section>

    <section>
      <h2>Energy records</h2>
      <table>
        <thead>
          <tr><th>Date</th><th>kWh</th><th>Factor</th><th>CO2 (kg)</th><th></th></tr>
        </thead>
        <tbody id="energy-rows"></tbody>
      </table>
    </section>

    <section>
      <h2>Fuel records</h2>
      <table>
        <thead>
          <tr><th>Date</th><th>Km</th><th>Km/l</th><th>Fuel</th><th>CO2 (kg)</th><th></th></tr>
        </thead>
        <tbody id="fuel-rows"></tbody>
      </table>
    </section>

    <section>
      <div class="tabs" role="tablist">
        <button class="tab active" type="button" data-tab="monthly" role="tab">Monthly totals</button>
        <button class="tab" type="button" data-tab="category" role="tab">By category</button>
      </div>
      <div class="chart-card">
        <svg id="chart" viewBox="0 0 600 260" aria-label="Summary chart" role="img"></svg>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const GRID_FACTOR = {{GRID_FACTOR}};
    const YEAR = {{YEAR}};

    const statusEl = document.getElementById('status');
    const chartEl = document.getElementById('chart');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    let fuels = [];
    let emissions = { energy: [], fuel: [] };
    let summaryData = null;
    let activeTab = 'monthly';

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const fmt = (value) => Math.round(value * 1000) / 1000;

    const displayDate = (value) => {
      const m = /^(\d{4})-(\d{2})-(\d{2})/.exec(value || '');
      return m ? m[3] + '/' + m[2] + '/' + m[1] : (value || '');
    };

    // Mirrors the server formulas for the live preview only; the server
    // recomputes on save.
    const energyCo2 = (kwh) => (kwh > 0 ? kwh * GRID_FACTOR : 0);
    const fuelCo2 = (km, eff, factor) =>
      (km > 0 && eff > 0 && factor ? (km / eff) * factor : 0);

    const energyPreview = () => {
      const kwh = parseFloat(document.getElementById('energy-kwh').value);
      const co2 = energyCo2(kwh || 0);
      document.getElementById('energy-preview').textContent = 'CO2: ' + fmt(co2) + ' kg';
    };

    const selectedFuel = () => {
      const id = document.getElementById('fuel-select').value;
      return fuels.find((f) => String(f.id) === String(id)) || null;
    };

    const fuelPreview = () => {
      const km = parseFloat(document.getElementById('fuel-km').value);
      const eff = parseFloat(document.getElementById('fuel-efficiency').value);
      const fuel = selectedFuel();
      const co2 = fuelCo2(km || 0, eff || 0, fuel ? fuel.emission_factor : 0);
      document.getElementById('fuel-preview').textContent = 'CO2: ' + fmt(co2) + ' kg';
    };

    const loadFuels = async () => {
      const res = await fetch('/api/fuels');
      if (!res.ok) {
        fuels = [];
        return;
      }
      fuels = await res.json();
      const select = document.getElementById('fuel-select');
      select.innerHTML = '<option value="">-- select --</option>' +
        fuels.map((f) => '<option value="' + f.id + '">' + f.name + '</option>').join('');
    };

    const renderRows = (records, kind) => {
      const body = document.getElementById(kind === 'energy' ? 'energy-rows' : 'fuel-rows');
      body.innerHTML = records.map((r) => {
        const cells = kind === 'energy'
          ? [displayDate(r.date), fmt(r.kwh_consumed), r.emission_factor, fmt(r.co2_emitted)]
          : [displayDate(r.date), fmt(r.km_traveled), fmt(r.efficiency), r.fuel_name || '--', fmt(r.co2_emitted)];
        const actions = '<button class="link" data-kind="' + kind + '" data-action="edit" data-id="' + r.id + '">edit</button>' +
          '<button class="link" data-kind="' + kind + '" data-action="delete" data-id="' + r.id + '">delete</button>';
        return '<tr>' + cells.map((c) => '<td>' + c + '</td>').join('') + '<td>' + actions + '</td></tr>';
      }).join('');
    };

    const loadEmissions = async () => {
      const res = await fetch('/api/emissions');
      if (!res.ok) {
        throw new Error('Unable to load emissions');
      }
      emissions = await res.json();
      renderRows(emissions.energy, 'energy');
      renderRows(emissions.fuel, 'fuel');
    };

    const renderLineChart = (labels, values) => {
      if (!values.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }
      const width = 600, height = 260, paddingX = 44, paddingY = 34, top = 24;
      let min = Math.min(...values, 0);
      let max = Math.max(...values, 0);
      if (min === max) { min -= 1; max += 1; }
      const range = max - min;
      const xStep = values.length > 1 ? (width - paddingX * 2) / (values.length - 1) : 0;
      const scaleY = (height - top - paddingY) / range;
      const x = (i) => paddingX + i * xStep;
      const y = (v) => height - paddingY - (v - min) * scaleY;

      const path = values
        .map((v, i) => (i === 0 ? 'M' : 'L') + ' ' + x(i).toFixed(2) + ' ' + y(v).toFixed(2))
        .join(' ');

      let grid = '';
      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${fmt(value)}</text>`;
      }

      const labelEvery = labels.length > 8 ? 2 : 1;
      const xLabels = labels
        .map((label, i) => (i % labelEvery !== 0 ? '' :
          `<text class="chart-label" x="${x(i)}" y="${height - paddingY + 18}" text-anchor="middle">${label.slice(5)}</text>`))
        .join('');

      const circles = values
        .map((v, i) => `<circle class="chart-point" cx="${x(i)}" cy="${y(v)}" r="4" />`)
        .join('');

      chartEl.innerHTML = grid + `<path class="chart-line" d="${path}" />` + circles + xLabels;
    };

    const renderBarChart = (labels, values) => {
      const width = 600, height = 260, paddingX = 80, paddingY = 40;
      const max = Math.max(...values, 1);
      const slot = (width - paddingX * 2) / values.length;
      const barWidth = slot / 2;
      const bars = values.map((v, i) => {
        const cx = paddingX + slot * (i + 0.5);
        const barHeight = (v / max) * (height - paddingY * 2);
        const yTop = height - paddingY - barHeight;
        return `<rect class="chart-bar" x="${cx - barWidth / 2}" y="${yTop}" width="${barWidth}" height="${barHeight}" rx="6" />` +
          `<text class="chart-label" x="${cx}" y="${height - paddingY + 18}" text-anchor="middle">${labels[i]}</text>` +
          `<text class="chart-label" x="${cx}" y="${yTop - 8}" text-anchor="middle">${fmt(v)}</text>`;
      }).join('');
      chartEl.innerHTML = bars;
    };

    const renderActiveTab = () => {
      if (!summaryData) {
        return;
      }
      if (activeTab === 'category') {
        renderBarChart(summaryData.by_category.labels, summaryData.by_category.data);
      } else {
        renderLineChart(summaryData.monthly_totals.labels, summaryData.monthly_totals.data);
      }
    };

    const loadSummary = async () => {
      const res = await fetch('/api/summary?year=' + YEAR);
      if (!res.ok) {
        throw new Error('Unable to load summary');
      }
      summaryData = await res.json();
      document.getElementById('total-co2').textContent = fmt(summaryData.total_co2);
      document.getElementById('record-count').textContent = summaryData.record_count;
      document.getElementById('most-used-fuel').textContent = summaryData.most_used_fuel || '--';
      document.getElementById('quarter-avg').textContent = fmt(summaryData.quarter_avg);
      document.getElementById('reduction').textContent =
        summaryData.reduction_percent === null ? '--' : fmt(summaryData.reduction_percent) + '%';
      renderActiveTab();
    };

    const refresh = async () => {
      await Promise.all([loadEmissions(), loadSummary()]);
    };

    const saveRecord = async (url, payload) => {
      setStatus('Saving...', 'info');
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      await refresh();
      setStatus('Saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    document.getElementById('energy-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const idRaw = document.getElementById('energy-id').value;
      const payload = {
        date: document.getElementById('energy-date').value,
        kwh_consumed: parseFloat(document.getElementById('energy-kwh').value) || 0
      };
      if (idRaw) {
        payload.id = idRaw;
      }
      saveRecord('/api/emissions/energy', payload)
        .then(() => {
          document.getElementById('energy-form').reset();
          document.getElementById('energy-id').value = '';
          energyPreview();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('fuel-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const idRaw = document.getElementById('fuel-record-id').value;
      const fuel = selectedFuel();
      const payload = {
        date: document.getElementById('fuel-date').value,
        km_traveled: parseFloat(document.getElementById('fuel-km').value) || 0,
        efficiency: parseFloat(document.getElementById('fuel-efficiency').value) || 0
      };
      if (fuel) {
        payload.fuel_id = fuel.id;
      }
      if (idRaw) {
        payload.id = idRaw;
      }
      saveRecord('/api/emissions/fuel', payload)
        .then(() => {
          document.getElementById('fuel-form').reset();
          document.getElementById('fuel-record-id').value = '';
          fuelPreview();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.addEventListener('click', (event) => {
      const button = event.target.closest('button[data-action]');
      if (!button) {
        return;
      }
      const { kind, action, id } = button.dataset;
      if (action === 'delete') {
        fetch('/api/emissions/' + kind + '/' + id, { method: 'DELETE' })
          .then((res) => {
            if (!res.ok) {
              throw new Error('Delete failed');
            }
            return refresh();
          })
          .catch((err) => setStatus(err.message, 'error'));
        return;
      }
      if (action !== 'edit') {
        return;
      }
      const list = kind === 'energy' ? emissions.energy : emissions.fuel;
      const record = list.find((r) => String(r.id) === String(id));
      if (!record) {
        return;
      }
      if (kind === 'energy') {
        document.getElementById('energy-id').value = record.id;
        document.getElementById('energy-date').value = record.date;
        document.getElementById('energy-kwh').value = record.kwh_consumed;
        energyPreview();
      } else {
        document.getElementById('fuel-record-id').value = record.id;
        document.getElementById('fuel-date').value = record.date;
        document.getElementById('fuel-km').value = record.km_traveled;
        document.getElementById('fuel-efficiency').value = record.efficiency;
        document.getElementById('fuel-select').value = record.fuel_id || '';
        fuelPreview();
      }
    });

    tabs.forEach((button) => {
      button.addEventListener('click', () => {
        activeTab = button.dataset.tab;
        tabs.forEach((b) => b.classList.toggle('active', b === button));
        renderActiveTab();
      });
    });

    document.getElementById('energy-kwh').addEventListener('input', energyPreview);
    ['fuel-km', 'fuel-efficiency', 'fuel-select'].forEach((id) => {
      document.getElementById(id).addEventListener('input', fuelPreview);
      document.getElementById(id).addEventListener('change', fuelPreview);
    });

    loadFuels()
      .then(refresh)
      .catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
