//! End-to-end scenarios for the poll loop, driven entirely by mocks.
//!
//! Time is simulated: `MockSleeper::advancing` moves the `MockClock` by the
//! check interval on every sleep, so a three-minute budget runs instantly.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use kicker::{
    parse_from, KickerConfig, LoopState, MockSleeper, PollLoop, TerminationOutcome,
    DELETION_GRACE_PERIOD_SECS,
};
use kicker_clock::{Clock, MockClock};
use kicker_kube::{DeleteRequest, MockTerminator};
use kicker_netlink::{AddressInfo, LinkInfo, MockEnumerator};

fn config_with_env(pod_name: Option<&str>) -> KickerConfig {
    let cli = parse_from([
        "calico-kicker",
        "--check-interval",
        "30s",
        "--termination-timeout",
        "3m",
        "--interface-names",
        "ifaceA,ifaceB",
    ])
    .expect("parse");

    let pod_name = pod_name.map(String::from);
    KickerConfig::from_cli(&cli, move |key: &str| match key {
        "POD_NAMESPACE" => Some("calico-system".to_string()),
        "POD_NAME" => pod_name.clone(),
        _ => None,
    })
    .expect("config")
}

fn addr_a() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(10, 244, 1, 7))
}

fn addr_b() -> IpAddr {
    IpAddr::V6(Ipv6Addr::new(0xfd00, 0x10, 0, 0, 0, 0, 0, 7))
}

// ===========================================
// Scenario A: both interfaces resolve with one address each
// ===========================================

#[test]
fn scenario_a_ready_network_is_satisfied() {
    let config = config_with_env(Some("kicker-abc"));
    let enumerator = MockEnumerator::with_state(
        vec![
            LinkInfo::named(1, "lo"),
            LinkInfo::named(10, "ifaceA"),
            LinkInfo::named(11, "ifaceB"),
        ],
        vec![
            AddressInfo::bound(1, IpAddr::V4(Ipv4Addr::LOCALHOST)),
            AddressInfo::bound(10, addr_a()),
            AddressInfo::bound(11, addr_b()),
        ],
    );
    let terminator = MockTerminator::new();
    let clock = MockClock::default();
    let sleeper = MockSleeper::advancing(clock.clone());

    let mut poll = PollLoop::new(&config, &enumerator, &terminator, clock.clone());

    assert_eq!(poll.run_until_terminal(&sleeper), LoopState::Satisfied);
    assert_eq!(terminator.count(), 0);
    assert!(poll.termination().is_none());

    // Later ticks never touch the network again.
    let calls = enumerator.link_calls();
    for _ in 0..20 {
        clock.advance(config.check_interval);
        poll.tick();
    }
    assert_eq!(enumerator.link_calls(), calls);
    assert_eq!(terminator.count(), 0);
}

// ===========================================
// Scenario B: only ifaceA resolves
// ===========================================

#[test]
fn scenario_b_partial_network_terminates_once() {
    let config = config_with_env(Some("kicker-abc"));
    let enumerator = MockEnumerator::with_state(
        vec![LinkInfo::named(10, "ifaceA")],
        vec![AddressInfo::bound(10, addr_a())],
    );
    let terminator = MockTerminator::new();
    let clock = MockClock::default();
    let sleeper = MockSleeper::advancing(clock.clone());

    let mut poll = PollLoop::new(&config, &enumerator, &terminator, clock.clone());

    assert_eq!(poll.run_until_terminal(&sleeper), LoopState::Expired);
    assert!(clock.now() >= config.termination_timeout);
    assert_eq!(poll.termination(), Some(&TerminationOutcome::Requested));
    assert_eq!(
        terminator.requests(),
        vec![DeleteRequest {
            namespace: "calico-system".to_string(),
            name: "kicker-abc".to_string(),
            grace_period_secs: DELETION_GRACE_PERIOD_SECS,
        }]
    );

    for _ in 0..20 {
        clock.advance(config.check_interval);
        assert_eq!(poll.tick(), LoopState::Expired);
    }
    assert_eq!(terminator.count(), 1);
}

// ===========================================
// Scenario C: as B, without a Pod name
// ===========================================

#[test]
fn scenario_c_missing_pod_name_expires_without_delete() {
    let config = config_with_env(None);
    let enumerator = MockEnumerator::with_state(
        vec![LinkInfo::named(10, "ifaceA")],
        vec![AddressInfo::bound(10, addr_a())],
    );
    let terminator = MockTerminator::new();
    let clock = MockClock::default();
    let sleeper = MockSleeper::advancing(clock.clone());

    let mut poll = PollLoop::new(&config, &enumerator, &terminator, clock.clone());

    assert_eq!(poll.run_until_terminal(&sleeper), LoopState::Expired);
    assert_eq!(poll.termination(), Some(&TerminationOutcome::MissingName));
    assert_eq!(terminator.count(), 0);

    clock.advance(Duration::from_secs(3600));
    assert_eq!(poll.tick(), LoopState::Expired);
    assert_eq!(terminator.count(), 0);
}

// ===========================================
// Scenario D: every enumeration fails
// ===========================================

#[test]
fn scenario_d_enumeration_errors_behave_like_partial_network() {
    let config = config_with_env(Some("kicker-abc"));
    let enumerator = MockEnumerator::failing("netlink: operation not permitted");
    let terminator = MockTerminator::new();
    let clock = MockClock::default();
    let sleeper = MockSleeper::advancing(clock.clone());

    let mut poll = PollLoop::new(&config, &enumerator, &terminator, clock.clone());

    assert_eq!(poll.run_until_terminal(&sleeper), LoopState::Expired);
    assert_eq!(sleeper.sleeps(), 6);
    assert_eq!(terminator.count(), 1);
    assert_eq!(terminator.requests()[0].name, "kicker-abc");
}

// ===========================================
// Default interfaces
// ===========================================

#[test]
fn default_interfaces_wait_for_both_wireguard_devices() {
    let cli = parse_from(["calico-kicker"]).expect("parse");
    let config = KickerConfig::from_cli(&cli, |_| None).expect("config");

    let enumerator = MockEnumerator::with_state(
        vec![LinkInfo::named(20, "wireguard.cali"), LinkInfo::named(21, "wg-v6.cali")],
        vec![AddressInfo::bound(20, addr_a())],
    );
    let terminator = MockTerminator::new();
    let clock = MockClock::default();
    let mut poll = PollLoop::new(&config, &enumerator, &terminator, clock.clone());

    clock.advance(config.check_interval);
    assert_eq!(poll.tick(), LoopState::Running);

    enumerator.set_addresses(vec![AddressInfo::bound(20, addr_a()), AddressInfo::bound(21, addr_b())]);
    clock.advance(config.check_interval);
    assert_eq!(poll.tick(), LoopState::Satisfied);
}
