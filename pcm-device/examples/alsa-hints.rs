use pcm_device::{alsa, Category};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let categories = match std::env::args().nth(1) {
        Some(category) => vec![category.parse::<Category>()?],
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        println!("{}:", category);

        for hint in pcm_device::hints(&alsa::Alsa, category)? {
            println!("  Name: {}", hint.name.as_deref().unwrap_or("-"));

            if let Some(description) = &hint.description {
                for line in description.lines() {
                    println!("    {}", line);
                }
            }

            match hint.io {
                Some(io) => println!("    Direction: {}", io),
                None => println!("    Direction: Both"),
            }
        }
    }

    Ok(())
}
