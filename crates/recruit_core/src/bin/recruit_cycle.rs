//! Run one full recruiting cycle on a generated class and print the results.
//!
//! Usage: recruit_cycle [seed] [class_size] [teams] [config.yaml]

use anyhow::{Context, Result};
use recruit_core::{ClassGenerator, RecruitingConfig, RecruitingState, TickDriver};

fn parse_arg<T: std::str::FromStr>(args: &[String], i: usize, default: T) -> Result<T> {
    match args.get(i) {
        Some(raw) => raw.parse().map_err(|_| anyhow::anyhow!("invalid argument {}: {}", i, raw)),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = parse_arg(&args, 1, 2024)?;
    let class_size: usize = parse_arg(&args, 2, 300)?;
    let team_count: usize = parse_arg(&args, 3, 24)?;

    let config = match args.get(4) {
        Some(path) => RecruitingConfig::load(path).with_context(|| format!("loading {}", path))?,
        None => RecruitingConfig::from_env_or_default(),
    };
    let driver = TickDriver::new(config)?;

    println!("🏀 Recruiting cycle: seed {}, {} recruits, {} teams", seed, class_size, team_count);

    let mut generator = ClassGenerator::new(seed);
    let class = generator.class(class_size);
    let teams = generator.league(team_count);
    let linked = class.iter().filter(|r| r.is_package_linked()).count();
    println!("📋 Generated class ({} recruits in package deals)", linked);

    let state = driver.run_cycle(RecruitingState::new(class), &teams, seed, None)?;

    println!("\n📊 Signing class by team:");
    let mut ranked: Vec<_> = teams
        .iter()
        .map(|t| {
            let signees = state.commits_for(&t.name);
            let stars: u32 = signees.iter().map(|r| r.stars as u32).sum();
            (t, signees.len(), stars)
        })
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.name.cmp(&b.0.name)));
    for (team, count, stars) in &ranked {
        println!(
            "  {:<18} prestige {:>3}  signed {:>2}  stars {:>3}",
            team.name, team.prestige, count, stars
        );
    }

    let unsigned = state.uncommitted().count();
    println!("\n📰 {} headlines, {} recruits unsigned", state.news.len(), unsigned);
    for item in state.news.iter().rev().take(5) {
        println!("  [week {}] {}", item.week, item.text);
    }

    println!("\n🔒 State fingerprint: {}", state.fingerprint()?);
    Ok(())
}
