pub mod endpoint;
pub mod error;

use crate::model;
pub use error::Error;
use md5::{Digest, Md5};
use serde_json::Value;

use std::collections::HashMap;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

pub fn portal(base_url: String, username: String, password: String) -> model::Portal {
    model::Portal {
        base_url,
        username,
        password,
    }
}

/// Lowercase hex MD5 of the UTF-8 password bytes. The portal never sees the
/// plaintext password; this digest is the credential sent as `passwordCrc`.
fn hash_password(password: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join("")
}

/// Map connection and status failures to Error, keeping the HTTP status
/// around when one was received.
fn map_transport_err(error: reqwest::Error) -> Error {
    Error::Transport(error.status(), error.to_string())
}

/// The portal signals "nothing for you" with a falsy payload instead of an
/// error status: null, false, 0, "", [] or {} all count.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Pull the payload out of the portal's envelope (`keys` may be empty for
/// endpoints that answer at the root) and reject missing or falsy results.
fn unwrap_response(
    endpoint: &endpoint::Endpoint,
    mut value: Value,
    keys: &[&str],
) -> Result<Value, Error> {
    for key in keys {
        value = match value.get_mut(*key) {
            Some(inner) => inner.take(),
            None => return Err(Error::EmptyResponse(endpoint.to_string())),
        };
    }

    if is_empty(&value) {
        Err(Error::EmptyResponse(endpoint.to_string()))
    } else {
        Ok(value)
    }
}

/// Open a session. The portal replies 200 with an opaque body whether or
/// not the credentials are any good; success only becomes observable as
/// usable responses on later calls, so the response is not inspected here.
/// Session cookies set by the reply land in the client's cookie store.
pub async fn login(portal: &model::Portal) -> Result<model::LoggedInPortal, Error> {
    let client = reqwest::ClientBuilder::new()
        .cookie_store(true)
        .build()
        .or(Err(Error::InternalError))?;
    let url = format!("{}{}", portal.base_url, endpoint::LOGIN);

    let form = HashMap::from([
        ("account", portal.username.to_owned()),
        ("password", String::new()),
        ("validateCode", String::new()),
        ("isReadPact", "0".to_string()),
        ("passwordCrc", hash_password(&portal.password)),
    ]);

    client
        .post(url)
        .header(http::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
        .form(&form)
        .send()
        .await
        .map_err(map_transport_err)?;

    Ok(model::LoggedInPortal {
        base_url: portal.base_url.to_owned(),
        client,
    })
}

/// Shared request path of every read operation. Which parameters travel in
/// the query string and which in the form body differs per endpoint and the
/// portal does not accept the other placement, so both are taken explicitly.
async fn post(
    api: &model::LoggedInPortal,
    endpoint: &endpoint::Endpoint,
    query: Option<&[(&str, &str)]>,
    form: Option<&HashMap<&str, String>>,
) -> Result<Value, Error> {
    let url = format!("{}{}", api.base_url, endpoint);

    let mut request = api.client.post(url);
    if let Some(query) = query {
        request = request.query(query);
    }
    if let Some(form) = form {
        request = request.form(form);
    }

    let response = request
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(map_transport_err)?;

    let response_text = response.text().await.map_err(map_transport_err)?;

    log::trace!(
        "endpoint: {}, query: {:?}, form: {:?}, response_text: {}",
        endpoint,
        query,
        form,
        response_text
    );

    serde_json::from_str(&response_text).or(Err(Error::InvalidResponse(endpoint.to_string())))
}

/// List the plant summaries registered to the logged-in account.
pub async fn plants(api: &model::LoggedInPortal) -> Result<Value, Error> {
    let value = post(api, endpoint::PLANT_LIST, None, None).await?;
    unwrap_response(endpoint::PLANT_LIST, value, &[])
}

/// Full detail record of one plant.
pub async fn plant(api: &model::LoggedInPortal, plant_id: &str) -> Result<Value, Error> {
    let query = [("plantId", plant_id)];
    let value = post(api, endpoint::PLANT_DATA, Some(&query), None).await?;
    unwrap_response(endpoint::PLANT_DATA, value, &["obj"])
}

/// Identifiers of the mix devices attached to a plant, as the portal's raw
/// rows (serial number twice plus a status flag).
pub async fn mix_ids(api: &model::LoggedInPortal, plant_id: &str) -> Result<Value, Error> {
    let query = [("plantId", plant_id)];
    let value = post(api, endpoint::DEVICES_BY_PLANT, Some(&query), None).await?;
    unwrap_response(endpoint::DEVICES_BY_PLANT, value, &["obj", "mix"])
}

/// Paged listing of all devices of a plant. `page` is passed through as the
/// portal's `currPage`; walking further pages is up to the caller.
pub async fn plant_devices(
    api: &model::LoggedInPortal,
    plant_id: &str,
    page: u32,
) -> Result<Value, Error> {
    let form = HashMap::from([
        ("plantId", plant_id.to_owned()),
        ("currPage", page.to_string()),
    ]);
    let value = post(api, endpoint::DEVICES_BY_PLANT_LIST, None, Some(&form)).await?;
    unwrap_response(endpoint::DEVICES_BY_PLANT_LIST, value, &["obj"])
}

/// Cumulative energy counters of one mix device.
pub async fn mix_total(
    api: &model::LoggedInPortal,
    plant_id: &str,
    mix_sn: &str,
) -> Result<Value, Error> {
    let query = [("plantId", plant_id)];
    let form = HashMap::from([("mixSn", mix_sn.to_owned())]);
    let value = post(api, endpoint::MIX_TOTAL_DATA, Some(&query), Some(&form)).await?;
    unwrap_response(endpoint::MIX_TOTAL_DATA, value, &["obj"])
}

/// Live status snapshot of one mix device.
pub async fn mix_status(
    api: &model::LoggedInPortal,
    plant_id: &str,
    mix_sn: &str,
) -> Result<Value, Error> {
    let query = [("plantId", plant_id)];
    let form = HashMap::from([("mixSn", mix_sn.to_owned())]);
    let value = post(api, endpoint::MIX_STATUS_DATA, Some(&query), Some(&form)).await?;
    unwrap_response(endpoint::MIX_STATUS_DATA, value, &["obj"])
}

fn chart_form(period: (&'static str, &str), plant_id: &str, mix_sn: &str) -> HashMap<&'static str, String> {
    let (period_key, period_value) = period;
    HashMap::from([
        (period_key, period_value.to_owned()),
        ("plantId", plant_id.to_owned()),
        ("mixSn", mix_sn.to_owned()),
    ])
}

/// Per-day production/consumption/storage series of `date` (YYYY-MM-DD).
pub async fn energy_stats_daily(
    api: &model::LoggedInPortal,
    date: &str,
    plant_id: &str,
    mix_sn: &str,
) -> Result<Value, Error> {
    let form = chart_form(("date", date), plant_id, mix_sn);
    let value = post(api, endpoint::MIX_ENERGY_DAY_CHART, None, Some(&form)).await?;
    unwrap_response(endpoint::MIX_ENERGY_DAY_CHART, value, &[])
}

/// Per-month series of the month containing `date` (YYYY-MM).
pub async fn energy_stats_monthly(
    api: &model::LoggedInPortal,
    date: &str,
    plant_id: &str,
    mix_sn: &str,
) -> Result<Value, Error> {
    let form = chart_form(("date", date), plant_id, mix_sn);
    let value = post(api, endpoint::MIX_ENERGY_MONTH_CHART, None, Some(&form)).await?;
    unwrap_response(endpoint::MIX_ENERGY_MONTH_CHART, value, &[])
}

/// Per-year series of `year` (YYYY).
pub async fn energy_stats_yearly(
    api: &model::LoggedInPortal,
    year: &str,
    plant_id: &str,
    mix_sn: &str,
) -> Result<Value, Error> {
    let form = chart_form(("year", year), plant_id, mix_sn);
    let value = post(api, endpoint::MIX_ENERGY_YEAR_CHART, None, Some(&form)).await?;
    unwrap_response(endpoint::MIX_ENERGY_YEAR_CHART, value, &[])
}

/// Lifetime series, anchored at `year`.
pub async fn energy_stats_total(
    api: &model::LoggedInPortal,
    year: &str,
    plant_id: &str,
    mix_sn: &str,
) -> Result<Value, Error> {
    let form = chart_form(("year", year), plant_id, mix_sn);
    let value = post(api, endpoint::MIX_ENERGY_TOTAL_CHART, None, Some(&form)).await?;
    unwrap_response(endpoint::MIX_ENERGY_TOTAL_CHART, value, &[])
}

/// Battery charge/discharge series of the last seven days.
pub async fn weekly_battery_stats(
    api: &model::LoggedInPortal,
    plant_id: &str,
    mix_sn: &str,
) -> Result<Value, Error> {
    let form = HashMap::from([
        ("plantId", plant_id.to_owned()),
        ("mixSn", mix_sn.to_owned()),
    ]);
    let value = post(api, endpoint::MIX_BAT_CHART, None, Some(&form)).await?;
    unwrap_response(endpoint::MIX_BAT_CHART, value, &[])
}
