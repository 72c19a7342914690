//! Envelope Store Tests
//!
//! Save/load behaviour shared by the JSON and YAML backends.
//!
use chrono::{Local, NaiveDate, SubsecRound};
use pretty_assertions::assert_eq;
use rtb_store::prelude::*;
use rtb_store::{FixedClock, Shape};
use rtb_test_utils::{sample_mapping, sample_sequence, Scratch};
use serde_json::json;
use tracing::Level;

fn for_each_format(check: impl Fn(Format)) {
    for format in Format::ALL {
        check(format);
    }
}

#[test]
fn test_mapping_round_trip() -> anyhow::Result<()> {
    for format in Format::ALL {
        let scratch = Scratch::new();
        let store = scratch.store(format);

        store.save_mapping(sample_mapping(), "test123", None)?;
        assert_eq!(store.load_dict("test123", LoadScope::Payload), sample_mapping());
    }
    Ok(())
}

#[test]
fn test_sequence_round_trip() -> anyhow::Result<()> {
    for format in Format::ALL {
        let scratch = Scratch::new();
        let store = scratch.store(format);

        store.save_sequence(sample_sequence(), "test123", None)?;
        assert_eq!(store.load_list("test123", LoadScope::Payload), sample_sequence());
    }
    Ok(())
}

#[test]
fn test_nested_payload_round_trip() -> anyhow::Result<()> {
    for format in Format::ALL {
        let scratch = Scratch::new();
        let store = scratch.store(format);
        let payload = json!({
            "devices": [{"name": "sw1", "ports": [1, 2, 48]}, {"name": "sw2", "ports": []}],
            "enabled": true,
            "ratio": 0.5,
            "owner": null,
        });

        store.save(Payload::try_from(payload.clone()).unwrap(), "nested", None)?;
        let loaded = store.load_dict("nested", LoadScope::Payload);
        assert_eq!(serde_json::Value::Object(loaded), payload);
    }
    Ok(())
}

#[test]
fn test_missing_file_returns_empty() {
    for_each_format(|format| {
        let scratch = Scratch::new();
        let store = scratch.store(format);

        assert!(store.load_dict("nope", LoadScope::Payload).is_empty());
        assert!(store.load_list("nope", LoadScope::Payload).is_empty());
        assert_eq!(scratch.sink.count(Level::ERROR), 2);
    });
}

#[test]
fn test_wrong_shape_returns_empty() -> anyhow::Result<()> {
    for format in Format::ALL {
        let scratch = Scratch::new();
        let store = scratch.store(format);

        store.save_mapping(sample_mapping(), "dict", None)?;
        store.save_sequence(sample_sequence(), "list", None)?;

        assert!(store.load_list("dict", LoadScope::Payload).is_empty());
        assert!(store.load_dict("list", LoadScope::Payload).is_empty());
        assert_eq!(scratch.sink.count(Level::ERROR), 0);
        assert_eq!(scratch.sink.count(Level::WARN), 0);
    }
    Ok(())
}

#[test]
fn test_full_envelope_keeps_comment_and_time() -> anyhow::Result<()> {
    for format in Format::ALL {
        let scratch = Scratch::new();
        let store = scratch.store(format);
        let before = Local::now().naive_local().trunc_subsecs(6);

        let written = store.save_mapping(sample_mapping(), "commented", Some("test"))?;
        assert!(written.saved_at >= before);

        let doc = store.load_dict("commented", LoadScope::Envelope);
        assert_eq!(doc["comment"], json!("test"));

        let envelope = store.load_envelope("commented").expect("envelope loads");
        assert_eq!(envelope.comment, "test");
        assert_eq!(envelope.saved_at, written.saved_at);
        assert_eq!(envelope, written);
    }
    Ok(())
}

#[test]
fn test_fixed_clock_timestamp_survives_round_trip() -> anyhow::Result<()> {
    let moment = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_micro_opt(23, 59, 59, 999_999)
        .unwrap();
    for format in Format::ALL {
        let scratch = Scratch::new();
        let store = scratch.store_at(format, FixedClock::new(moment));

        store.save_sequence(vec![], "leap", None)?;
        let envelope = store.try_load_envelope("leap")?;
        assert_eq!(envelope.saved_at, moment);
    }
    Ok(())
}

#[test]
fn test_suffix_is_appended_on_disk() -> anyhow::Result<()> {
    let scratch = Scratch::new();
    let json = scratch.store(Format::Json);
    let yaml = scratch.store(Format::Yaml);

    let env = json.save_sequence(vec![], "report", None)?;
    assert_eq!(env.filename, "report.json");
    assert!(scratch.path("report.json").is_file());
    assert!(!scratch.path("report").exists());

    let env = yaml.save_sequence(vec![], "report.yml", None)?;
    assert_eq!(env.filename, "report.yml");
    assert!(scratch.path("report.yml").is_file());
    assert!(!scratch.path("report.yml.yml").exists());
    Ok(())
}

#[test]
fn test_save_overwrites_whole_file() -> anyhow::Result<()> {
    for format in Format::ALL {
        let scratch = Scratch::new();
        let store = scratch.store(format);

        store.save_sequence(sample_sequence(), "over", Some("first"))?;
        store.save_mapping(sample_mapping(), "over", None)?;

        let envelope = store.try_load_envelope("over")?;
        assert_eq!(envelope.comment, "");
        assert_eq!(envelope.payload.shape(), Shape::Mapping);
        assert!(store.load_list("over", LoadScope::Payload).is_empty());
    }
    Ok(())
}

#[test]
fn test_json_file_layout() -> anyhow::Result<()> {
    let scratch = Scratch::new();
    let store = scratch.store(Format::Json);
    store.save_mapping(sample_mapping(), "layout", Some("c"))?;

    let text = std::fs::read_to_string(scratch.path("layout.json"))?;
    assert!(text.starts_with("{\n  \"fname\": \"layout.json\",\n  \"comment\": \"c\",\n  \"date\": \""));
    assert!(text.contains("\n  \"data\": {\n    \"hello\": \"there\"\n  }\n}"));
    Ok(())
}

#[test]
fn test_malformed_files_degrade_to_empty() {
    let cases = [
        ("broken.json", "{\"fname\": "),
        ("scalar.json", "42"),
        ("nodata.json", "{\"fname\": \"nodata.json\", \"date\": \"2024-01-01 00:00:00.000000\"}"),
        ("broken.yml", "data: [unclosed\n"),
        ("empty.yml", ""),
        ("nodata.yml", "fname: nodata.yml\ncomment: ''\n"),
    ];
    let scratch = Scratch::new();
    for (name, text) in cases {
        std::fs::write(scratch.path(name), text).unwrap();
        let store = EnvelopeStore::for_path(name, scratch.config())
            .unwrap()
            .with_sink(scratch.sink.clone());

        assert!(store.load_dict(name, LoadScope::Payload).is_empty(), "{name}");
        assert!(store.load_list(name, LoadScope::Payload).is_empty(), "{name}");
        assert!(store.load_envelope(name).is_none(), "{name}");
        assert!(
            matches!(store.try_load_payload(name), Err(LoadError::Malformed { .. })),
            "{name}"
        );
    }
    assert_eq!(scratch.sink.count(Level::WARN), cases.len() * 3);
}

#[test]
fn test_yaml_reads_hand_written_envelope() {
    let scratch = Scratch::new();
    std::fs::write(
        scratch.path("hand.yml"),
        "comment: from an editor\ndata:\n- 10.0.0.1\n- 10.0.0.2\ndate: 2024-05-01 08:30:00.250000\nfname: hand.yml\n",
    )
    .unwrap();
    let store = scratch.store(Format::Yaml);

    assert_eq!(
        store.load_list("hand", LoadScope::Payload),
        vec![json!("10.0.0.1"), json!("10.0.0.2")]
    );
    let envelope = store.load_envelope("hand").expect("valid envelope");
    assert_eq!(envelope.comment, "from an editor");
    assert_eq!(
        envelope.saved_at,
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_micro_opt(8, 30, 0, 250_000)
            .unwrap()
    );
}
