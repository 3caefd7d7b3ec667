use config::Config;
use growatt_rs::api;
use growatt_rs::model::LoggedInPortal;
use serde_json::Value;

const BASE_URL: &str = "https://server.growatt.com";

#[derive(Clone, serde::Deserialize)]
pub struct GrowattConfig {
    base_url: String,
    username: String,
    password: String,
}

pub fn read_settings() -> GrowattConfig {
    let mut settings = Config::default();
    settings
        .merge(config::Environment::with_prefix("GW"))
        .unwrap()
        .set_default("base_url", BASE_URL)
        .unwrap();

    settings.try_into().expect("Configuration error")
}

/// Walk every plant and every mix device of the account and print the raw
/// portal payloads. Devices that answer with an error are logged and
/// skipped so one dead inverter does not hide the rest.
async fn dump_portal(api: &LoggedInPortal) -> Result<(), api::Error> {
    let plants = api::plants(api).await?;
    println!("plants: {:#}", plants);

    for plant in plants.as_array().into_iter().flatten() {
        let plant_id = match plant.get("id").and_then(Value::as_str) {
            Some(id) => id,
            None => continue,
        };

        match api::plant(api, plant_id).await {
            Ok(detail) => println!("plant {}: {:#}", plant_id, detail),
            Err(e) => log::error!("error reading plant {}: {}", plant_id, e),
        }

        let mixes = match api::mix_ids(api, plant_id).await {
            Ok(mixes) => mixes,
            Err(e) => {
                log::warn!("no mix devices returned for plant {}: {}", plant_id, e);
                continue;
            }
        };

        for row in mixes.as_array().into_iter().flatten() {
            let mix_sn = match row.get(0).and_then(Value::as_str) {
                Some(sn) => sn,
                None => continue,
            };

            match api::mix_status(api, plant_id, mix_sn).await {
                Ok(status) => println!("mix {} status: {:#}", mix_sn, status),
                Err(e) => log::error!("error reading status of mix {}: {}", mix_sn, e),
            }

            match api::mix_total(api, plant_id, mix_sn).await {
                Ok(total) => println!("mix {} totals: {:#}", mix_sn, total),
                Err(e) => log::error!("error reading totals of mix {}: {}", mix_sn, e),
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let settings = read_settings();
    let portal = api::portal(settings.base_url, settings.username, settings.password);

    let logged_in = match api::login(&portal).await {
        Ok(logged_in) => logged_in,
        Err(e) => {
            log::error!("login failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = dump_portal(&logged_in).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
