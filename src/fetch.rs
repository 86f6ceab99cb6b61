use crate::{
    config::RuntimeConfiguration,
    data::student::{BloodFamilies, RawStudent, Student},
    error::{DecodeRosterSnafu, FetchRosterSnafu, RosterResult},
};
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use std::time::Duration;

pub fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(format!("sortinghat/{}", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(60))
        .build()
        .expect("unable to build HTTP client")
}

async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    what: &'static str,
) -> RosterResult<T> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .context(FetchRosterSnafu { what })?;

    response.json::<T>().await.context(DecodeRosterSnafu { what })
}

/// Fetches the student records and the blood-status families concurrently
/// and waits for both before preparation runs; blood status is a hard input
/// of `Student::prepare`, so there is no path where students are prepared
/// against missing family data.
pub async fn load_roster(
    client: &reqwest::Client,
    config: &RuntimeConfiguration,
) -> RosterResult<Vec<Student>> {
    let source = config.source_config();

    let (raw_students, families) = tokio::try_join!(
        fetch_json::<Vec<RawStudent>>(client, source.students_url(), "student records"),
        fetch_json::<BloodFamilies>(client, source.families_url(), "blood-status families"),
    )?;

    info!(
        students = raw_students.len(),
        pure = families.pure.len(),
        half = families.half.len(),
        "Loaded roster data"
    );

    Ok(raw_students
        .iter()
        .map(|raw| Student::prepare(raw, &families))
        .collect())
}
