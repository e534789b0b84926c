//! Floating Tags entry point
//!
//! On the web this mounts the animation into `#floating-tags`. Natively it
//! runs the simulation headless and reports what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    let settings = floating_tags::Settings::load();
    match floating_tags::platform::web::start("floating-tags", settings) {
        // The loop keeps itself alive through its animation-frame closure
        Some(handle) => std::mem::forget(handle),
        None => log::error!("No #floating-tags element to animate"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    native::run(native::Cli::parse());
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::{Parser, ValueEnum};
    use floating_tags::platform::{Driver, FixedContainer, RecordingRenderer};
    use floating_tags::{Container, ResizePolicy, Settings, TagField};

    #[derive(Parser, Debug)]
    #[command(name = "floating-tags")]
    #[command(about = "Run the floating tag layout headless")]
    #[command(version)]
    pub struct Cli {
        /// Seed for placement and label choice
        #[arg(short, long, default_value = "1")]
        pub seed: u64,

        /// Number of simulation steps to run
        #[arg(short, long, default_value = "600")]
        pub frames: u32,

        /// Container width in pixels
        #[arg(long, default_value = "1100")]
        pub width: f32,

        /// Container height in pixels
        #[arg(long, default_value = "500")]
        pub height: f32,

        /// Settings file (JSON)
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Override the resize policy from the settings
        #[arg(long, value_enum)]
        pub resize_policy: Option<PolicyArg>,

        /// Print every recorded frame as JSON instead of a summary
        #[arg(long)]
        pub json: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum PolicyArg {
        /// Keep tags and clamp them into the new bounds
        Clamp,
        /// Re-place tags stranded by a shrink
        Relayout,
    }

    impl From<PolicyArg> for ResizePolicy {
        fn from(arg: PolicyArg) -> Self {
            match arg {
                PolicyArg::Clamp => ResizePolicy::Clamp,
                PolicyArg::Relayout => ResizePolicy::Relayout,
            }
        }
    }

    impl Cli {
        pub fn container(&self) -> Container {
            Container::new(self.width, self.height)
        }

        /// Settings from `--config` (or defaults) with CLI overrides applied
        pub fn settings(&self) -> Settings {
            let mut settings = match &self.config {
                Some(path) => Settings::load_from(path),
                None => Settings::default(),
            };
            if let Some(policy) = self.resize_policy {
                settings.resize_policy = policy.into();
            }
            settings
        }
    }

    pub fn run(cli: Cli) {
        let container = cli.container();
        log::info!(
            "Floating tags (native) starting: seed {}, {} frames in {}x{}",
            cli.seed,
            cli.frames,
            container.width,
            container.height
        );

        let mut driver = Driver::new(
            TagField::new(cli.settings(), cli.seed),
            FixedContainer::new(container),
            RecordingRenderer::default(),
        );
        driver.start();

        let mut bounces = 0u64;
        let mut swaps = 0u64;
        for _ in 0..cli.frames {
            if let Some(report) = driver.frame() {
                bounces += report.wall_bounces as u64;
                swaps += report.swaps as u64;
            }
        }

        if cli.json {
            match driver.renderer().to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Failed to encode frames: {}", e),
            }
        } else {
            println!(
                "{} tags, {} frames, {} wall bounces, {} velocity swaps",
                driver.field().items().len(),
                driver.frames(),
                bounces,
                swaps
            );
            for item in driver.field().items() {
                println!(
                    "  #{:<2} {:<9} at ({:7.1}, {:7.1}) vel ({:5.2}, {:5.2})",
                    item.id, item.label, item.pos.x, item.pos.y, item.vel.x, item.vel.y
                );
            }
        }

        driver.stop();
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn parse(args: &str) -> Result<Cli, clap::Error> {
            Cli::try_parse_from(std::iter::once("floating-tags").chain(args.split_whitespace()))
        }

        #[test]
        fn test_cli_defaults() {
            let cli = parse("").unwrap();
            assert_eq!(cli.seed, 1);
            assert_eq!(cli.frames, 600);
            assert_eq!(cli.container(), Container::new(1100.0, 500.0));
            assert!(!cli.json);
            assert_eq!(cli.settings(), Settings::default());
        }

        #[test]
        fn test_cli_all_flags() {
            let cli = parse("--seed 7 --frames 10 --width 300 --height 200 --json").unwrap();
            assert_eq!(cli.seed, 7);
            assert_eq!(cli.frames, 10);
            assert_eq!(cli.container(), Container::new(300.0, 200.0));
            assert!(cli.json);
        }

        #[test]
        fn test_cli_resize_policy_override() {
            let cli = parse("--resize-policy relayout").unwrap();
            assert_eq!(cli.settings().resize_policy, ResizePolicy::Relayout);
            assert!(parse("--resize-policy sideways").is_err());
        }

        #[test]
        fn test_cli_rejects_bad_input() {
            assert!(parse("--seed").is_err());
            assert!(parse("--frames ten").is_err());
            assert!(parse("--bogus").is_err());
        }
    }
}
