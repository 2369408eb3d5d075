//! End-to-end anonymization scenarios.
//!
//! These tests verify:
//! - Public addresses are masked, private ones leave the line untouched
//! - Email local-parts and domains are truncated by ratio
//! - IPv6 zone indices do not disturb masking
//! - Undecodable input switches the stream to raw passthrough for good

use loganon_engine::{AnonError, EngineConfig, Pipeline, PipelineState, ProcessorRegistry};

fn pipeline(config: &EngineConfig) -> Pipeline {
    Pipeline::new(&ProcessorRegistry::standard(), config).expect("valid config")
}

fn run(pipeline: &Pipeline, input: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    pipeline.run(input, &mut output).expect("in-memory run");
    output
}

// ============================================================================
// Line Scenarios
// ============================================================================

#[test]
fn test_public_ipv4_masked() {
    let p = pipeline(&EngineConfig::default());
    assert_eq!(
        p.anonymize_line("connect from 203.0.113.42 ok"),
        "connect from 203.0.113.0 ok"
    );
}

#[test]
fn test_private_ipv4_line_unchanged() {
    let p = pipeline(&EngineConfig::default());
    for addr in ["10.0.0.5", "192.168.1.1", "127.0.0.1"] {
        let line = format!("connect from {} ok", addr);
        assert_eq!(p.anonymize_line(&line), line);
    }
}

#[test]
fn test_private_address_suppresses_other_addresses() {
    let p = pipeline(&EngineConfig::default());
    let line = "nat 203.0.113.42 -> 10.0.0.5";
    assert_eq!(p.anonymize_line(line), line);
}

#[test]
fn test_email_ratio() {
    let p = pipeline(&EngineConfig::default());
    assert_eq!(
        p.anonymize_line("user alice@example.com logged in"),
        "user al...@...e.com logged in"
    );
}

#[test]
fn test_ipv6_zone_index() {
    let mut config = EngineConfig::default();
    config.ipv6.include_private = true;
    let p = pipeline(&config);

    let out = p.anonymize_line("fe80::1%eth0 reachable");
    assert_eq!(out, "fe80::%eth0 reachable");
}

#[test]
fn test_ipv6_link_local_is_private_by_default() {
    let p = pipeline(&EngineConfig::default());
    let line = "fe80::1%eth0 reachable";
    assert_eq!(p.anonymize_line(line), line);
}

#[test]
fn test_tcpdump_address_port_form() {
    let p = pipeline(&EngineConfig::default());
    assert_eq!(
        p.anonymize_line("IP 203.0.113.42.443 > 198.51.100.7.55000: Flags [S]"),
        "IP 203.0.113.0.443 > 198.51.100.0.55000: Flags [S]"
    );
}

#[test]
fn test_ipv6_with_embedded_ipv4_tail() {
    let p = pipeline(&EngineConfig::default());
    assert_eq!(
        p.anonymize_line("peer 2001:db8::a:192.0.2.1 up"),
        "peer 2001:db8:: up"
    );
    assert_eq!(p.anonymize_line("peer ::a:192.0.2.1 up"), "peer :: up");

    let ipv6_only = pipeline(&EngineConfig::default().with_processors(["ipv6"]));
    assert_eq!(
        ipv6_only.anonymize_line("peer 2001:db8::a:192.0.2.1 up"),
        "peer 2001:db8:: up"
    );
}

#[test]
fn test_selected_processors_only() {
    let config = EngineConfig::default().with_processors(["email"]);
    let p = pipeline(&config);
    assert_eq!(
        p.anonymize_line("alice@example.com from 203.0.113.42"),
        "al...@...e.com from 203.0.113.42"
    );
}

#[test]
fn test_custom_masks() {
    let mut config = EngineConfig::default();
    config.ipv4.mask_bits = 16;
    config.ipv6.mask_bits = 96;
    let p = pipeline(&config);
    assert_eq!(
        p.anonymize_line("203.0.113.42 2001:db8:1:2:3:4:5:6"),
        "203.0.0.0 2001:db8::"
    );
}

// ============================================================================
// Stream Scenarios
// ============================================================================

#[test]
fn test_passthrough_from_undecodable_line() {
    let p = pipeline(&EngineConfig::default());

    let mut input = Vec::new();
    input.extend_from_slice(b"first 203.0.113.42\n");
    input.extend_from_slice(b"second bob@example.org\n");
    input.extend_from_slice(b"third \xc3\x28 203.0.113.42\n");
    input.extend_from_slice(b"fourth 203.0.113.42\n");

    let mut output = Vec::new();
    let stats = p.run(input.as_slice(), &mut output).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(b"first 203.0.113.0\n");
    expected.extend_from_slice(b"second b...@...e.org\n");
    expected.extend_from_slice(b"third \xc3\x28 203.0.113.42\n");
    expected.extend_from_slice(b"fourth 203.0.113.42\n");

    assert_eq!(output, expected);
    assert_eq!(stats.lines, 4);
    assert_eq!(stats.lines_modified, 2);
    assert_eq!(stats.passthrough_from, Some(3));
    assert_eq!(stats.final_state, PipelineState::Passthrough);
}

#[test]
fn test_line_count_preserved() {
    let p = pipeline(&EngineConfig::default());
    let input = b"a 8.8.8.8\n\nb x@y.com\nc 2001:db8::1\n";
    let output = run(&p, input);
    assert_eq!(
        output.iter().filter(|&&b| b == b'\n').count(),
        input.iter().filter(|&&b| b == b'\n').count()
    );
}

#[test]
fn test_multibyte_text_survives() {
    let p = pipeline(&EngineConfig::default());
    let output = run(&p, "журнал 203.0.113.42 ✓\n".as_bytes());
    assert_eq!(String::from_utf8(output).unwrap(), "журнал 203.0.113.0 ✓\n");
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[test]
fn test_unknown_processor_is_config_error() {
    let config = EngineConfig::default().with_processors(["ipv4", "hostname"]);
    let err = Pipeline::new(&ProcessorRegistry::standard(), &config).unwrap_err();
    assert!(err.is_config_error());
    assert!(matches!(err, AnonError::UnknownProcessor { ref name, .. } if name == "hostname"));
    assert!(err.to_string().contains("ipv4, ipv6, email"));
}

#[test]
fn test_invalid_ratio_is_config_error() {
    let mut config = EngineConfig::default();
    config.email.ratio = 1.5;
    let err = Pipeline::new(&ProcessorRegistry::standard(), &config).unwrap_err();
    assert!(err.is_config_error());
}
