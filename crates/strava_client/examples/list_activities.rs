use strava_client::{config::ClientConfig, fetch_all_activities, http_client::ReqwestStravaClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = ClientConfig::from_env()?;
    let client = ReqwestStravaClient::from_config(&cfg);

    let activities = fetch_all_activities(&client, cfg.per_page)
        .await
        .map_err(|e| format!("failed to fetch activities: {}", e))?;

    if activities.is_empty() {
        println!("No activities returned (check the access token scope)");
        return Ok(());
    }

    println!("Activities ({}):", activities.len());
    for a in activities {
        let date = a.start_date_local.as_deref().unwrap_or("unknown");
        let kind = a.activity_type.as_deref().unwrap_or("?");
        let name = a.name.unwrap_or_else(|| "(no name)".to_string());
        println!("- {} {} {} ({:.2} km)", date, kind, name, a.distance / 1000.0);
    }

    Ok(())
}
