//! `keytally stats`: load the tally file and render it once.

use crate::cli::StatsArgs;
use keytally_core::{
    config::{Config, StatsMode},
    LoadOutcome, TallyStore,
};
use keytally_tui::{RenderOptions, ViewMode};

pub fn run(args: &StatsArgs, config: &Config) -> anyhow::Result<()> {
    let data_file = args.file.clone().unwrap_or_else(|| config.tracking.data_file.clone());

    let store = TallyStore::new();
    match store.load(&data_file) {
        LoadOutcome::Loaded { .. } | LoadOutcome::Missing => {}
        problem => eprintln!("warning: {}: {problem}", data_file.display()),
    }

    let options = RenderOptions {
        mode: view_mode(args, config),
        color: config.stats.color && !args.no_color,
    };
    keytally_tui::print_stats(&store.snapshot(), options)
}

fn view_mode(args: &StatsArgs, config: &Config) -> ViewMode {
    match args.mode.map(StatsMode::from).unwrap_or(config.stats.mode) {
        StatsMode::List => ViewMode::List {
            top_n: args.top.filter(|n| *n > 0).or_else(|| config.stats.top_n()),
        },
        StatsMode::Keyboard => ViewMode::Keyboard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ModeArg;

    fn args(mode: Option<ModeArg>, top: Option<usize>) -> StatsArgs {
        StatsArgs { file: None, mode, top, no_color: false }
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::defaults();
        config.stats.top_n = 3;
        assert_eq!(view_mode(&args(None, None), &config), ViewMode::List { top_n: Some(3) });
        assert_eq!(view_mode(&args(None, Some(7)), &config), ViewMode::List { top_n: Some(7) });
        assert_eq!(view_mode(&args(Some(ModeArg::Keyboard), None), &config), ViewMode::Keyboard);
    }

    #[test]
    fn zero_top_means_config_default() {
        let config = Config::defaults();
        assert_eq!(view_mode(&args(None, Some(0)), &config), ViewMode::List { top_n: None });
    }
}
