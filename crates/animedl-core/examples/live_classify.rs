use animedl_core::parser::{parse_anime_page, parse_episodes, parse_search_results};
use animedl_core::range::displayed_range;
use animedl_core::{classify, SearchResolver, Selectors, SiteClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let phrase = std::env::args().nth(1).unwrap_or_else(|| "Naruto".to_string());
    let client = SiteClient::new()?;
    let selectors = Selectors::default();

    println!("🔍 Cerco '{}'...\n", phrase);

    let results = SearchResolver::new(&client, &selectors).search(&phrase).await?;
    println!("Trovati {} risultati:", results.len());

    for (i, item) in results.iter().enumerate().take(5) {
        let page = client.fetch_page(&item.page_url).await?;
        let anime = parse_anime_page(&page, &selectors)?;
        let range = parse_episodes(&anime.episode_links)
            .ok()
            .and_then(|episodes| displayed_range(&episodes))
            .map(|(first, last)| format!("{}-{}", first, last))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {}. {} [{:?}] episodi {} ({})",
            i + 1,
            item.title,
            classify(&anime, "VVVVID"),
            range,
            item.page_url
        );
    }

    // The search page parser is also usable on saved HTML
    if let Some(path) = std::env::args().nth(2) {
        let html = std::fs::read_to_string(path)?;
        let saved = parse_search_results(&animedl_core::Page::parse(&html), &selectors)?;
        println!("\n📄 Risultati nel file salvato: {}", saved.len());
    }

    Ok(())
}
