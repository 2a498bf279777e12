use starfield::Application;
use starfield::config::DEFAULT_STAR_COUNT;
use starfield_engine::logging::{init_logging, LoggingConfig};

/// Settings read from the environment.
///
/// - `STARFIELD_SEED`  fixed seed for a reproducible sky
/// - `STARFIELD_STARS` population size
/// - `STARFIELD_GLOBE` `0` / `false` hides the globe
///
/// Unparseable values are reported and replaced by the default.
#[derive(Debug, Clone, PartialEq)]
struct StudioEnv {
    seed:       Option<u64>,
    star_count: usize,
    globe:      bool,
}

impl Default for StudioEnv {
    fn default() -> Self {
        Self { seed: None, star_count: DEFAULT_STAR_COUNT, globe: true }
    }
}

impl StudioEnv {
    fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut env = Self::default();

        if let Some(raw) = lookup("STARFIELD_SEED") {
            match raw.trim().parse() {
                Ok(seed) => env.seed = Some(seed),
                Err(e) => log::warn!("ignoring STARFIELD_SEED={raw:?}: {e}"),
            }
        }

        if let Some(raw) = lookup("STARFIELD_STARS") {
            match raw.trim().parse() {
                Ok(n) => env.star_count = n,
                Err(e) => log::warn!("ignoring STARFIELD_STARS={raw:?}: {e}"),
            }
        }

        if let Some(raw) = lookup("STARFIELD_GLOBE") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "0" | "false" | "off" | "no" => env.globe = false,
                "1" | "true" | "on" | "yes" => env.globe = true,
                _ => log::warn!("ignoring STARFIELD_GLOBE={raw:?}: expected true or false"),
            }
        }

        env
    }

    fn application(&self) -> Application {
        let app = Application::new()
            .title("Starfield")
            .size(1280.0, 720.0)
            .star_count(self.star_count)
            .globe(self.globe);
        match self.seed {
            Some(seed) => app.seed(seed),
            None => app,
        }
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    let env = StudioEnv::from_env();
    log::debug!("studio settings: {env:?}");

    if let Err(e) = env.application().run() {
        eprintln!("starfield runtime error: {e:#}");
        std::process::exit(1);
    }
}
