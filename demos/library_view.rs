use pokedex::output::{self, OutputFormat, PageSnapshot};
use pokedex::runner::{Options, Runner};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(Options {
        timeout_seconds: Some(30),
        ..Options::default()
    })?;
    let mut loaded = runner.run().await?;

    println!("Catalog: {}", loaded.view.catalog().len());
    println!("Skipped: {}", loaded.rejected.len());

    loaded.view.toggle_category("Feu");
    loaded.view.toggle_category("Vol");
    loaded.view.set_search_text("a");
    loaded.view.go_to_last_page();

    let snapshot = PageSnapshot::capture(&loaded.view);
    let rendered = output::render(&snapshot, OutputFormat::Text)?;
    print!("{}", String::from_utf8_lossy(&rendered));

    Ok(())
}
