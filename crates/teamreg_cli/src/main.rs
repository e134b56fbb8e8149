//! Demo entry point.
//!
//! # Responsibility
//! - Run the two-collection journal scenario against `teamreg_core`.
//! - Print the collections and the journal so the output can be eyeballed.
//!
//! File logging is enabled when `TEAMREG_LOG_DIR` is set.

use log::warn;
use std::process::ExitCode;
use std::rc::Rc;
use teamreg_core::{
    init_logging, LoggingConfig, Paper, Person, ResearchTeam, TeamKey, TeamRegistry, TeamsJournal,
    TimeFrame,
};

fn main() -> ExitCode {
    let logging = LoggingConfig::from_env()
        .and_then(|config| config.map_or(Ok(()), |config| init_logging(&config)));
    if let Err(err) = logging {
        eprintln!("logging disabled: {err}");
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("teamreg_cli failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut collection1 = TeamRegistry::new("Collection1");
    let mut collection2 = TeamRegistry::new("Collection2");

    let journal = Rc::new(TeamsJournal::new());
    journal.subscribe_to(&mut collection1);
    journal.subscribe_to(&mut collection2);

    let mut team1 = ResearchTeam::new("Team1", "Org1", 1, TimeFrame::Year)?;
    let author = Person::new("Ada", "Lovelace");
    team1.add_members([&author]);
    team1.add_papers([&Paper::new("Notes", author.clone(), chrono::Utc::now())]);
    collection1.add(team1)?;
    collection2.add(ResearchTeam::new("Team2", "Org2", 2, TimeFrame::TwoYears)?)?;

    // A duplicate is reported, not swallowed.
    if let Err(err) = collection1.add(ResearchTeam::new("Again", "Org1", 1, TimeFrame::Long)?) {
        warn!("event=demo_duplicate module=cli status=rejected error={err}");
        println!("rejected: {err}");
    }

    let key1 = TeamKey::new("Org1", 1);
    collection1.update(&key1, |team| team.research_topic = "NewTopic".to_string());
    let key2 = TeamKey::new("Org2", 2);
    collection2.update(&key2, |team| team.research_topic = "ModifiedTopic".to_string());

    println!("{}", collection1.short_description());
    if let Some(date) = collection1.last_publication_date() {
        println!("last publication: {}", date.format("%Y-%m-%d"));
    }

    if let Some(team1) = collection1.get_by_key(&key1).cloned() {
        collection1.remove(&team1);
    }
    if let Some(team2) = collection2.get_by_key(&key2).cloned() {
        let replacement = ResearchTeam::new("NewTeam", "Org3", 3, TimeFrame::Long)?;
        collection2.replace(&team2, replacement);
    }

    println!("{journal}");
    Ok(())
}
