use serde::ser::{Error as _, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_capture::{
    bind, to_token, to_token_with_config, Candidate, ConversionConfig, ConversionPolicy, Error,
    LimitedConverter, Result, Token,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

#[derive(Clone, Debug)]
struct Recorded {
    level: Level,
    fields: HashMap<String, String>,
}

impl Recorded {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Keeps every event it sees, fields rendered to strings.
#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<Recorded>>>,
}

struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));
        self.events.lock().unwrap().push(Recorded {
            level: *event.metadata().level(),
            fields,
        });
    }
}

fn record<F: FnOnce()>(f: F) -> Vec<Recorded> {
    let recorder = Recorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    tracing::subscriber::with_default(subscriber, f);
    let events = recorder.events.lock().unwrap().clone();
    events
}

fn at_level(events: &[Recorded], level: Level) -> Vec<&Recorded> {
    events.iter().filter(|e| e.level == level).collect()
}

#[derive(Debug)]
struct RejectsSequences;

impl ConversionPolicy for RejectsSequences {
    fn try_convert(
        &self,
        _converter: &LimitedConverter<'_>,
        candidate: &Candidate<'_>,
    ) -> Result<Option<Token>> {
        match candidate {
            Candidate::Seq(_) => Err(Error::policy("RejectsSequences", "no sequences today")),
            _ => Ok(None),
        }
    }
}

struct Account;

impl Serialize for Account {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        struct Secret;

        impl Serialize for Secret {
            fn serialize<S: Serializer>(
                &self,
                _serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                Err(S::Error::custom("vault locked"))
            }
        }

        let mut s = serializer.serialize_struct("Account", 2)?;
        s.serialize_field("owner", "ada")?;
        s.serialize_field("secret", &Secret)?;
        s.end()
    }
}

#[test]
fn test_policy_failure_is_an_error_event() {
    let events = record(|| {
        let config = ConversionConfig::new().with_additional_policy(Arc::new(RejectsSequences));
        let token = to_token_with_config(&vec![1, 2, 3], config).unwrap();
        assert_eq!(token.as_sequence().map(<[Token]>::len), Some(3));
    });

    let errors = at_level(&events, Level::ERROR);
    assert_eq!(errors.len(), 1);
    let event = errors[0];
    assert_eq!(event.field("policy"), Some("RejectsSequences"));
    assert_eq!(event.field("value"), Some("[1, 2, 3]"));
    assert!(event.field("error").unwrap().contains("no sequences today"));
    assert_eq!(event.field("message"), Some("conversion policy failed"));
}

#[test]
fn test_member_failure_is_a_warning() {
    let events = record(|| {
        let _ = to_token(&Account);
    });

    let warnings = at_level(&events, Level::WARN);
    assert_eq!(warnings.len(), 1);
    let event = warnings[0];
    assert_eq!(event.field("member"), Some("Account.secret"));
    assert!(event.field("error").unwrap().contains("vault locked"));
    assert!(at_level(&events, Level::ERROR).is_empty());
}

#[test]
fn test_unbound_hole_is_a_warning() {
    let events = record(|| {
        let bound = bind("{A} {B}", &[&1]);
        assert_eq!(bound.to_string(), "1 {B}");
    });

    let warnings = at_level(&events, Level::WARN);
    assert_eq!(warnings.len(), 1);
    let event = warnings[0];
    assert_eq!(event.field("position"), Some("1"));
    assert_eq!(event.field("template"), Some("{A} {B}"));
    assert_eq!(event.field("message"), Some("required parameter not provided"));
}

#[test]
fn test_clean_conversion_is_quiet() {
    let events = record(|| {
        let _ = to_token(&vec!["a", "b"]);
        let _ = bind("{A} {B}", &[&1, &2]);
    });

    assert!(at_level(&events, Level::WARN).is_empty());
    assert!(at_level(&events, Level::ERROR).is_empty());
}
