use anyhow::{bail, Context, Result};
use armtraj::config::{preset_scenarios, AppConfig, GaParams};
use armtraj::types::{JointAngles, PlanResult};
use serde::Serialize;
use std::env;

#[derive(Serialize)]
struct Report<'a> {
    description: &'a str,
    link_lengths: &'a [f64],
    #[serde(flatten)]
    result: &'a PlanResult,
    joint_angles: Vec<JointAngles>,
}

fn usage() -> &'static str {
    "usage: armtraj [<config.toml> | --preset <n> | --list-presets]"
}

enum Command {
    Plan(AppConfig),
    ListPresets,
}

fn parse(args: &[String]) -> Result<Command> {
    match args {
        [] => Ok(Command::Plan(AppConfig::default())),
        [flag] if flag == "--list-presets" => Ok(Command::ListPresets),
        [flag, index] if flag == "--preset" => {
            let index: usize = index
                .parse()
                .with_context(|| format!("preset number expected, got {:?}", index))?;
            let scenario = index
                .checked_sub(1)
                .and_then(|i| preset_scenarios().into_iter().nth(i))
                .with_context(|| format!("no preset {}", index))?;
            let evolution = GaParams {
                mu: vec![1.0; scenario.link_lengths.len()],
                ..Default::default()
            };
            let config = AppConfig { evolution, scenario };
            config.validate()?;
            Ok(Command::Plan(config))
        }
        [path] => AppConfig::load_from_file(path)
            .map(Command::Plan)
            .with_context(|| format!("failed to load configuration from {}", path)),
        _ => bail!(usage()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let AppConfig { evolution, scenario } = match parse(&args)? {
        Command::Plan(config) => config,
        Command::ListPresets => {
            for (i, preset) in preset_scenarios().iter().enumerate() {
                println!("  {}: {}", i + 1, preset.description);
            }
            return Ok(());
        }
    };
    log::info!("Scenario: {}", scenario.description);

    let result = armtraj::plan_scenario(&scenario, &evolution).context("planning failed")?;

    // Joint angles for animating the returned path
    let mut solver = scenario.geometry()?.solver()?;
    let joint_angles = solver.time_series(&result.path).unwrap_or_else(|e| {
        log::warn!("Path cannot be animated: {}", e);
        Vec::new()
    });

    let report = Report {
        description: &scenario.description,
        link_lengths: &scenario.link_lengths,
        result: &result,
        joint_angles,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
