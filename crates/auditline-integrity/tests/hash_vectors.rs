//! Known-answer vectors shared with the audit-log service.

use auditline_integrity::{canonical_string, compute_hash, verify_hash, VerifyError};
use auditline_types::{Actor, Event, Fields, Group, ServerRecord, Target};

fn channel_list_event() -> Event {
    Event {
        group: Some(Group {
            id: "602f21a3fbd3f92302133762808b39af".to_string(),
            ..Group::default()
        }),
        actor: Some(Actor {
            id: "060dbbd5da8c43b57b26179a3bfb7b1a".to_string(),
            ..Actor::default()
        }),
        target: Some(Target {
            id: "6da2ecf53d388e107df6e4dbb061b165".to_string(),
            ..Target::default()
        }),
        source_ip: "172.19.0.1".to_string(),
        ..Event::new("channel.list")
    }
}

#[test]
fn channel_list_vector() {
    let record_id = "f59b236a449d43a5b27c8322aadc0503";
    let event = channel_list_event();

    assert_eq!(
        canonical_string(&event, record_id),
        "f59b236a449d43a5b27c8322aadc0503:channel.list:6da2ecf53d388e107df6e4dbb061b165:060dbbd5da8c43b57b26179a3bfb7b1a:602f21a3fbd3f92302133762808b39af:172.19.0.1:0:0::"
    );

    let record = ServerRecord::new(
        record_id,
        "2224989b8d83d4b23920f0136f8e3b11ce034d9e0b610ee97c1c198350838a9e",
    );
    assert_eq!(verify_hash(&event, &record), Ok(()));
}

#[test]
fn escaped_field_key_without_group_vector() {
    let event = Event {
        actor: Some(Actor {
            id: "user@domain.xyz".to_string(),
            ..Actor::default()
        }),
        target: Some(Target {
            id: "some_object01234".to_string(),
            ..Target::default()
        }),
        is_failure: true,
        fields: Fields::from([("abc=xyz".to_string(), "nothing special".to_string())]),
        ..Event::new("even.more.of.a.test")
    };

    assert_eq!(
        canonical_string(&event, "kfbr392"),
        "kfbr392:even.more.of.a.test:some_object01234:user@domain.xyz:::1:0:abc%3Dxyz=nothing special;"
    );
    assert_eq!(
        compute_hash(&event, "kfbr392").as_deref(),
        Ok("1c1fbb35785906500b7cd34d75bbd10bc264d5ebf4f2f5bb80aa5cd19f6548e3")
    );
}

#[test]
fn heavily_escaped_group_and_fields_vector() {
    let event = Event {
        group: Some(Group {
            id: "%% :: some %% customer :: %%".to_string(),
            ..Group::default()
        }),
        actor: Some(Actor {
            id: "user@domain.xyz".to_string(),
            ..Actor::default()
        }),
        target: Some(Target {
            id: "some_object01234".to_string(),
            ..Target::default()
        }),
        is_anonymous: false,
        is_failure: true,
        fields: Fields::from([
            (";zyx=cba;abc=xyz".to_string(), "nothing special".to_string()),
            (";Zyx=Cba%Abc=Xyz".to_string(), "% hi there %".to_string()),
        ]),
        ..Event::new("even.more.of.a.test")
    };
    let record = ServerRecord::new(
        "abf053dc4a3042459818833276eec717",
        "5b570bff4628b35262fb401d2f6c9bb38d29e212f6e0e8ea93445b4e5a253d50",
    );

    assert_eq!(verify_hash(&event, &record), Ok(()));
}

#[test]
fn external_id_and_metadata_vector() {
    let event = Event {
        actor: Some(Actor {
            id: "alice".to_string(),
            ..Actor::default()
        }),
        group: Some(Group {
            id: "acme".to_string(),
            ..Group::default()
        }),
        source_ip: "10.0.0.1".to_string(),
        external_id: "ext:42%".to_string(),
        metadata: Fields::from([
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "x=y;z".to_string()),
        ]),
        ..Event::new("user.login")
    };
    let record = ServerRecord::new(
        "rec-1",
        "a059c8a57295aec4be1424a2e2800fbd8485060c16645ee2568f71ccc6392141",
    );

    assert_eq!(verify_hash(&event, &record), Ok(()));
}

#[test]
fn tampered_event_fails_against_original_hash() {
    let record = ServerRecord::new(
        "f59b236a449d43a5b27c8322aadc0503",
        "2224989b8d83d4b23920f0136f8e3b11ce034d9e0b610ee97c1c198350838a9e",
    );
    let mut event = channel_list_event();
    event.source_ip = "172.19.0.2".to_string();

    let err = verify_hash(&event, &record).unwrap_err();
    assert!(matches!(
        err,
        VerifyError::Integrity { ref supplied, .. } if supplied == &record.hash
    ));
}
