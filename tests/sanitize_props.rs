use proptest::prelude::*;
use raven_mobile_boot as rmb;
use rmb::BootPayload;
use serde_json::Value;

fn payload_with(key: &str, text: String) -> BootPayload {
    let mut p = BootPayload::new();
    p.insert(key.to_string(), Value::String(text));
    p
}

// Text that cannot form or complete a script tag on its own.
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,:!?'\"\\\\{}\\[\\]-]{0,24}"
}

#[test]
fn spliced_closing_tags_are_removed_from_boot() {
    let p = payload_with("message", "a</</</script>script>script>b".to_string());
    let encoded = rmb::encode_boot(&p).unwrap();
    assert!(!encoded.contains("</script>"), "{encoded}");
    let decoded = rmb::decode_boot(&encoded).unwrap();
    assert_eq!(decoded, payload_with("message", "ab".to_string()));
}

proptest! {
    #[test]
    fn script_span_never_survives(prefix in plain_text(), suffix in plain_text()) {
        let p = payload_with("message", format!("{prefix}<script>alert(1)</script>{suffix}"));
        let encoded = rmb::encode_boot(&p).unwrap();
        prop_assert!(!encoded.contains("<script>alert(1)</script>"));
        prop_assert!(!encoded.contains("</script>"));
    }

    #[test]
    fn bare_closing_tag_is_stripped(prefix in plain_text(), suffix in plain_text()) {
        let p = payload_with("message", format!("{prefix}</script>{suffix}"));
        let decoded = rmb::decode_boot(&rmb::encode_boot(&p).unwrap()).unwrap();
        prop_assert_eq!(decoded, payload_with("message", format!("{prefix}{suffix}")));
    }

    #[test]
    fn clean_payload_round_trips(
        entries in prop::collection::btree_map("[a-z_]{1,8}", plain_text(), 0..6)
    ) {
        let p: BootPayload = entries
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        let decoded = rmb::decode_boot(&rmb::encode_boot(&p).unwrap()).unwrap();
        prop_assert_eq!(decoded, p);
    }

    #[test]
    fn no_closing_tag_survives_tag_fragments(text in "[<>/scriptSx\"]{0,40}") {
        prop_assert!(!rmb::strip_script_tags(&text).contains("</script>"));

        let encoded = rmb::encode_boot(&payload_with("message", text)).unwrap();
        prop_assert!(!encoded.contains("</script>"));
    }
}
