use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct EnergyRecord {
    id: i64,
    date: String,
    kwh_consumed: f64,
    emission_factor: f64,
    co2_emitted: f64,
}

#[derive(Debug, Deserialize)]
struct FuelRecord {
    id: i64,
    date: String,
    km_traveled: f64,
    efficiency: f64,
    fuel_name: String,
    emission_factor: f64,
    co2_emitted: f64,
}

#[derive(Debug, Deserialize)]
struct Emissions {
    energy: Vec<EnergyRecord>,
    fuel: Vec<FuelRecord>,
}

#[derive(Debug, Deserialize)]
struct ChartSeries {
    labels: Vec<String>,
    data: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    year: i32,
    monthly_totals: ChartSeries,
    by_category: ChartSeries,
    total_co2: f64,
    record_count: usize,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "co2_tracker_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/emissions")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_co2_tracker"))
        .env("PORT", port.to_string())
        .env("CO2_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn post_energy(client: &Client, base_url: &str, body: serde_json::Value) -> EnergyRecord {
    client
        .post(format!("{base_url}/api/emissions/energy"))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn post_fuel(client: &Client, base_url: &str, body: serde_json::Value) -> FuelRecord {
    client
        .post(format!("{base_url}/api/emissions/fuel"))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn get_emissions(client: &Client, base_url: &str) -> Emissions {
    client
        .get(format!("{base_url}/api/emissions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_energy_create_computes_co2_and_keeps_order() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let a = post_energy(
        &client,
        &server.base_url,
        serde_json::json!({ "date": "2030-02-01", "kwh_consumed": 100.0 }),
    )
    .await;
    let b = post_energy(
        &client,
        &server.base_url,
        serde_json::json!({ "date": "2030-03-05", "kwh_consumed": 50.0 }),
    )
    .await;
    let c = post_energy(
        &client,
        &server.base_url,
        serde_json::json!({ "date": "2030-01-15", "kwh_consumed": 10.0 }),
    )
    .await;

    assert_eq!(a.co2_emitted, 100.0 * a.emission_factor);
    assert_eq!(a.co2_emitted, 5.4);
    assert_eq!(a.date, "2030-02-01");

    let emissions = get_emissions(&client, &server.base_url).await;
    let mine: Vec<i64> = emissions
        .energy
        .iter()
        .map(|r| r.id)
        .filter(|id| [a.id, b.id, c.id].contains(id))
        .collect();
    assert_eq!(mine, vec![b.id, a.id, c.id]);
}

#[tokio::test]
async fn http_energy_edit_relocates_by_new_date() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let older = post_energy(
        &client,
        &server.base_url,
        serde_json::json!({ "date": "2031-01-10", "kwh_consumed": 20.0 }),
    )
    .await;
    let newer = post_energy(
        &client,
        &server.base_url,
        serde_json::json!({ "date": "2031-02-10", "kwh_consumed": 30.0 }),
    )
    .await;

    // Move the older record past the newer one.
    let moved = post_energy(
        &client,
        &server.base_url,
        serde_json::json!({ "id": older.id, "date": "2031-03-01", "kwh_consumed": 25.0 }),
    )
    .await;
    assert_eq!(moved.id, older.id);
    assert_eq!(moved.co2_emitted, 25.0 * moved.emission_factor);

    let emissions = get_emissions(&client, &server.base_url).await;
    let mine: Vec<i64> = emissions
        .energy
        .iter()
        .map(|r| r.id)
        .filter(|id| [older.id, newer.id].contains(id))
        .collect();
    assert_eq!(mine, vec![older.id, newer.id]);
    // The edit replaced the record instead of duplicating it.
    assert_eq!(
        emissions.energy.iter().filter(|r| r.id == older.id).count(),
        1
    );
}

#[tokio::test]
async fn http_fuel_create_resolves_fuel_table() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let gasoline = post_fuel(
        &client,
        &server.base_url,
        serde_json::json!({
            "date": "2032-01-10",
            "km_traveled": 100.0,
            "efficiency": 10.0,
            "fuel_id": 3
        }),
    )
    .await;
    assert_eq!(gasoline.fuel_name, "Gasoline");
    assert_eq!(gasoline.emission_factor, 2.318);
    assert_eq!(gasoline.co2_emitted, 23.18);

    // String id resolves the same entry as a numeric one.
    let ethanol = post_fuel(
        &client,
        &server.base_url,
        serde_json::json!({
            "date": "2032-01-11",
            "km_traveled": 92.0,
            "efficiency": 8.0,
            "fuel_id": "2"
        }),
    )
    .await;
    assert_eq!(ethanol.fuel_name, "Ethanol");
    assert_eq!(ethanol.co2_emitted, (92.0 / 8.0) * 1.533);

    // Unknown fuel degrades to a zero computation.
    let unknown = post_fuel(
        &client,
        &server.base_url,
        serde_json::json!({
            "date": "2032-01-12",
            "km_traveled": 500.0,
            "efficiency": 12.0,
            "fuel_id": 99
        }),
    )
    .await;
    assert_eq!(unknown.co2_emitted, 0.0);
    assert_eq!(unknown.fuel_name, "");
    assert_eq!(unknown.emission_factor, 0.0);
}

#[tokio::test]
async fn http_fuel_zero_efficiency_yields_zero_co2() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let record = post_fuel(
        &client,
        &server.base_url,
        serde_json::json!({
            "date": "2033-01-10",
            "km_traveled": 100.0,
            "efficiency": 0.0,
            "fuel_id": 1
        }),
    )
    .await;
    assert_eq!(record.co2_emitted, 0.0);
    assert_eq!(record.km_traveled, 100.0);
    assert_eq!(record.efficiency, 0.0);
}

#[tokio::test]
async fn http_delete_removes_record_then_404s() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let record = post_energy(
        &client,
        &server.base_url,
        serde_json::json!({ "date": "2034-01-10", "kwh_consumed": 42.0 }),
    )
    .await;

    let response = client
        .delete(format!(
            "{}/api/emissions/energy/{}",
            server.base_url, record.id
        ))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let emissions = get_emissions(&client, &server.base_url).await;
    assert!(emissions.energy.iter().all(|r| r.id != record.id));

    let again = client
        .delete(format!(
            "{}/api/emissions/energy/{}",
            server.base_url, record.id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_client_supplied_id_never_collides_with_allocated_ids() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    // A record created with an explicit id ahead of the server's counter.
    let claimed = post_energy(
        &client,
        &server.base_url,
        serde_json::json!({ "id": 777000, "date": "2036-01-10", "kwh_consumed": 11.0 }),
    )
    .await;
    assert_eq!(claimed.id, 777000);

    // Later id-less creates must allocate past the claimed id, not onto it.
    let first = post_energy(
        &client,
        &server.base_url,
        serde_json::json!({ "date": "2036-02-10", "kwh_consumed": 12.0 }),
    )
    .await;
    let second = post_energy(
        &client,
        &server.base_url,
        serde_json::json!({ "date": "2036-03-10", "kwh_consumed": 13.0 }),
    )
    .await;
    assert!(first.id > 777000);
    assert!(second.id > first.id);

    let emissions = get_emissions(&client, &server.base_url).await;
    for id in [claimed.id, first.id, second.id] {
        assert_eq!(
            emissions.energy.iter().filter(|r| r.id == id).count(),
            1,
            "record {id} should survive exactly once"
        );
    }
}

#[tokio::test]
async fn http_rejects_missing_date() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/emissions/energy", server.base_url))
        .json(&serde_json::json!({ "date": "  ", "kwh_consumed": 10.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_fuels_lists_reference_table() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let fuels: Vec<serde_json::Value> = client
        .get(format!("{}/api/fuels", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = fuels.iter().filter_map(|f| f["name"].as_str()).collect();
    assert_eq!(names, ["Diesel", "Ethanol", "Gasoline"]);
}

#[tokio::test]
async fn http_summary_has_chart_shapes() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    post_energy(
        &client,
        &server.base_url,
        serde_json::json!({ "date": "2035-06-15", "kwh_consumed": 200.0 }),
    )
    .await;

    let summary: Summary = client
        .get(format!("{}/api/summary?year=2035", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(summary.year, 2035);
    assert_eq!(summary.monthly_totals.labels.len(), 12);
    assert_eq!(summary.monthly_totals.data.len(), 12);
    assert_eq!(summary.monthly_totals.labels[5], "2035-06");
    assert!(summary.monthly_totals.data[5] >= 200.0 * 0.054);
    assert_eq!(summary.by_category.labels, ["Energy", "Fuel"]);
    assert!(summary.total_co2 > 0.0);
    assert!(summary.record_count >= 1);
}
