use pcm_device::{alsa, Negotiated};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let device = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("default"));

    match pcm_device::negotiate(&alsa::Alsa, &device) {
        Ok(negotiated) => report(&negotiated),
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(error.exit_code());
        }
    }
}

fn report(negotiated: &Negotiated<'_, alsa::Alsa>) {
    let config = negotiated.config();

    println!("Device: {}", negotiated.pcm().name());
    println!("Channels: {}", config.channels);
    println!("Access: {}", config.access);
    println!("Format: {}", config.format);
    println!("Rate: {} Hz", config.rate);
    println!("Period size: {} frames", config.period_size);
    println!("Periods: {}", config.periods);

    for deviation in config.deviations() {
        println!("Note: {}", deviation);
    }
}
