use teamreg_core::{ChangeKind, ResearchTeam, TeamKey, TeamRegistry, TeamsJournal, TimeFrame};
use std::rc::Rc;

fn team(
    topic: &str,
    organization: &str,
    registration_number: i32,
    time_frame: TimeFrame,
) -> ResearchTeam {
    ResearchTeam::new(topic, organization, registration_number, time_frame).unwrap()
}

#[test]
fn one_journal_records_two_collections_in_call_order() {
    let mut collection1 = TeamRegistry::new("Collection1");
    let mut collection2 = TeamRegistry::new("Collection2");
    let journal = Rc::new(TeamsJournal::new());
    journal.subscribe_to(&mut collection1);
    journal.subscribe_to(&mut collection2);

    collection1
        .add(team("Team1", "Org1", 1, TimeFrame::Year))
        .unwrap();
    collection2
        .add(team("Team2", "Org2", 2, TimeFrame::TwoYears))
        .unwrap();

    let key1 = TeamKey::new("Org1", 1);
    assert!(collection1.update(&key1, |team| team.research_topic = "NewTopic".to_string()));
    let team1 = collection1.get_by_key(&key1).unwrap().clone();
    assert!(collection1.remove(&team1));

    let team2 = collection2.get_by_key(&TeamKey::new("Org2", 2)).unwrap().clone();
    assert!(collection2.replace(&team2, team("NewTeam", "Org3", 3, TimeFrame::Long)));

    let entries = journal.entries();
    let summary: Vec<(&str, ChangeKind, i32)> = entries
        .iter()
        .map(|entry| {
            (
                entry.collection_name.as_str(),
                entry.kind,
                entry.registration_number,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Collection1", ChangeKind::Added, 1),
            ("Collection2", ChangeKind::Added, 2),
            ("Collection1", ChangeKind::Property, 1),
            ("Collection1", ChangeKind::Removed, 1),
            ("Collection2", ChangeKind::Replaced, 2),
        ]
    );
    assert_eq!(entries[2].description, "research_topic");
}

#[test]
fn failed_mutations_leave_journal_untouched() {
    let mut registry = TeamRegistry::new("strict");
    let journal = Rc::new(TeamsJournal::new());
    journal.subscribe_to(&mut registry);

    registry.add(team("a", "Org1", 1, TimeFrame::Year)).unwrap();
    registry
        .add(team("b", "Org1", 1, TimeFrame::Year))
        .unwrap_err();
    assert!(!registry.remove(&team("c", "Org9", 9, TimeFrame::Year)));

    assert_eq!(journal.len(), 1);
    assert_eq!(journal.entries()[0].description, "ResearchTeam added");
}

#[test]
fn every_subscriber_sees_each_event_once() {
    let mut registry = TeamRegistry::new("fanout");
    let first = Rc::new(TeamsJournal::new());
    let second = Rc::new(TeamsJournal::new());
    first.subscribe_to(&mut registry);
    second.subscribe_to(&mut registry);
    assert_eq!(registry.subscriber_count(), 2);

    registry.add_defaults();

    assert_eq!(first.len(), 3);
    assert_eq!(first.entries(), second.entries());
}

#[test]
fn unsubscribe_stops_only_that_journal() {
    let mut registry = TeamRegistry::new("partial");
    let kept = Rc::new(TeamsJournal::new());
    let dropped = Rc::new(TeamsJournal::new());
    kept.subscribe_to(&mut registry);
    let subscription = dropped.subscribe_to(&mut registry);

    registry.add(team("a", "Org1", 1, TimeFrame::Year)).unwrap();
    assert!(registry.unsubscribe(subscription));
    registry.add(team("b", "Org2", 2, TimeFrame::Year)).unwrap();

    assert_eq!(kept.len(), 2);
    assert_eq!(dropped.len(), 1);
}

#[test]
fn journal_outlives_registry() {
    let journal = Rc::new(TeamsJournal::new());
    {
        let mut registry = TeamRegistry::new("short-lived");
        journal.subscribe_to(&mut registry);
        registry.add(team("a", "Org1", 1, TimeFrame::Year)).unwrap();
    }

    assert_eq!(Rc::strong_count(&journal), 1);
    assert_eq!(
        journal.to_string(),
        "short-lived - Added: ResearchTeam added (1)"
    );
}

#[test]
fn journal_entries_serialize_with_snake_case_kind() {
    let mut registry = TeamRegistry::new("wire");
    let journal = Rc::new(TeamsJournal::new());
    journal.subscribe_to(&mut registry);
    registry.add(team("a", "Org1", 4, TimeFrame::Year)).unwrap();

    let json = serde_json::to_value(journal.entries()).unwrap();
    assert_eq!(json[0]["collection_name"], "wire");
    assert_eq!(json[0]["kind"], "added");
    assert_eq!(json[0]["registration_number"], 4);
}
