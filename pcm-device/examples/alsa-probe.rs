use pcm_device::alsa;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let device = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("default"));

    match pcm_device::probe(&alsa::Alsa, &device) {
        Ok(report) => println!("{}", report),
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(error.exit_code());
        }
    }
}
