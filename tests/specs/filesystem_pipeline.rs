//! Scenario 1 (filesystem pipeline happy path): an input directory holds
//! three Messages, each with a two-step Header. After a single pass over
//! the filesystem producer, the results directory holds three Messages
//! whose body is unchanged and whose Header has been popped to its tail.

use npipes_core::{Body, Command, Encoding, Header, Message, Serializable, Step, Trigger};
use serde_json::json;

use crate::prelude::Project;

fn two_step_message(n: u32) -> Message {
    let step1 = Step {
        id: "step1".into(),
        command: Command {
            arglist: vec!["cat".into(), "${bodyfile}".into()],
            ..Default::default()
        },
        ..Default::default()
    };
    let step2 = Step {
        id: "step2".into(),
        trigger: Trigger::Filesystem {
            dir: "./results".into(),
        },
        ..Default::default()
    };
    Message {
        header: Header {
            encoding: Encoding::PlainText,
            steps: vec![step1, step2],
        },
        body: Body::InString {
            string: format!("Message {n}"),
            encoding: Encoding::PlainText,
        },
    }
}

#[test]
fn filesystem_producer_drains_directory_into_results() {
    let project = Project::empty();
    let input_dir = project.subdir("input");
    let results_dir = project.path().join("results");

    for n in 1..=3 {
        project.file(
            input_dir.join(n.to_string()),
            &two_step_message(n).to_json_lines(),
        );
    }

    let config = json!({
        "NPIPES_command": Command::default().to_value(),
        "NPIPES_lockCommand": false,
        "NPIPES_commandValidator": "",
        "NPIPES_producer": "filesystem",
        "NPIPES_producerArgs": {
            "dir": input_dir.to_string_lossy(),
            "removeSuccesses": true,
            "quitWhenEmpty": true,
        },
        "NPIPES_SqsOverflowPath": "",
    });
    project.file("npipesrc.json", &config.to_string());

    crate::prelude::npipes_cmd()
        .arg("--config")
        .arg(project.path().join("npipesrc.json"))
        .current_dir(project.path())
        .assert()
        .success();

    let mut seen = std::collections::HashSet::new();
    let entries = std::fs::read_dir(&results_dir).expect("results dir should exist");
    let mut count = 0;
    for entry in entries {
        let entry = entry.expect("dir entry");
        let contents = std::fs::read_to_string(entry.path()).expect("read result file");
        let parsed = Message::from_json_lines(&contents)
            .into_success()
            .expect("result message should parse");

        assert_eq!(parsed.header.steps.len(), 1);
        assert_eq!(parsed.header.steps[0].id, "step2");

        let Body::InString { string, .. } = &parsed.body else {
            panic!("expected InString body");
        };
        assert!(string.starts_with("Message "));
        seen.insert(string.clone());
        count += 1;
    }
    assert_eq!(count, 3);
    assert_eq!(
        seen,
        ["Message 1", "Message 2", "Message 3"]
            .into_iter()
            .map(String::from)
            .collect()
    );

    // Successes are removed from the input directory once processed.
    assert_eq!(std::fs::read_dir(&input_dir).unwrap().count(), 0);
}
