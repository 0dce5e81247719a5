use nba_rosters_core::RosterCrawler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let team = std::env::args().nth(1).unwrap_or_else(|| "BOS".to_string());
    let crawler = RosterCrawler::new()?;

    println!("Resolving team directory...\n");
    let directory = crawler.resolve_directory().await?;
    let codes: Vec<&str> = directory.keys().map(String::as_str).collect();
    println!("Found {} teams: {}", directory.len(), codes.join(" "));

    let Some(url) = directory.get(&team) else {
        println!("Team {} is not on the landing page", team);
        return Ok(());
    };

    println!("\nCurrent roster for {} ({}):\n", team, url);
    let roster = crawler.fetch_roster(url).await?;
    for player in &roster {
        println!(
            "  {:<28} {:<6} {:<6} {:<5} {}",
            player.name, player.position, player.height, player.weight, player.birthdate
        );
    }

    println!("\nWalking season chain (about 3 s per season)...\n");
    let history = crawler.walk_team(&team, url).await;
    for (year, roster) in history.seasons.iter().rev() {
        println!("  {}: {} players", year, roster.len());
    }
    if let Some(err) = &history.failure {
        println!("\nStopped early: {}", err);
    }

    Ok(())
}
