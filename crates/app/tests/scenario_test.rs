//! End-to-end scenarios driving the dashboard the way a front-end would.
//!
//! Timer-driven tests run on a paused tokio clock, so a full 100-tick ramp
//! completes instantly.

use homedash_app::animation::DEFAULT_TICK_PERIOD;
use homedash_app::services::dashboard::Dashboard;
use homedash_domain::device::{
    Camera, Device, DeviceReport, Light, SecurityStatus, Switchable, Thermostat,
};
use homedash_domain::id::{DeviceId, DeviceKind};
use homedash_domain::registry::Registry;

// ---------------------------------------------------------------------------
// Core device + registry scenario
// ---------------------------------------------------------------------------

#[test]
fn should_run_light_thermostat_camera_scenario_on_core_types() {
    let mut registry = Registry::new();

    registry.add(Light::new("L1"));
    let light = registry.light_mut(&DeviceId::from("L1")).unwrap();
    assert!(light.turn_on());
    assert_eq!(light.brightness(), 100);

    registry.add(Thermostat::new("T1"));
    let thermostat = registry.thermostat_mut(&DeviceId::from("T1")).unwrap();
    thermostat.set_temperature(22.5);
    assert!(thermostat.turn_on());
    assert!((thermostat.temperature() - 22.5).abs() < f64::EPSILON);

    registry.add(Camera::new("C1"));
    let camera = registry.camera_mut(&DeviceId::from("C1")).unwrap();
    assert!(camera.turn_on());
    let status = camera.set_random_security_status().clone();
    assert!(matches!(status, SecurityStatus::Safe | SecurityStatus::Unsafe));
    assert!(camera.is_on());

    assert_eq!(registry.len(), 3);
    assert!(registry.list().iter().all(Device::is_on));
}

#[test]
fn should_end_in_state_of_last_call_for_every_device() {
    let mut devices: Vec<Device> = vec![
        Light::new("L1").into(),
        Thermostat::new("T1").with_status(true).into(),
        Camera::new("C1").into(),
    ];

    for device in &mut devices {
        device.turn_off();
        device.turn_on();
        assert!(device.is_on());
        device.turn_on();
        device.turn_off();
        assert!(!device.is_on());
    }

    let light = devices[0].as_light().unwrap();
    assert_eq!(light.brightness(), 0);
}

// ---------------------------------------------------------------------------
// Dashboard workflow
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn should_animate_full_on_off_cycle_through_dashboard() {
    let mut dashboard = Dashboard::new(DEFAULT_TICK_PERIOD);
    let key = dashboard.add_device(DeviceKind::Light, "L1").unwrap();

    dashboard.toggle(&key).unwrap();
    while dashboard.next_tick().await {}
    assert_eq!(
        light_report(&dashboard),
        Some((true, 100)),
        "light should be fully on"
    );

    dashboard.toggle(&key).unwrap();
    while dashboard.next_tick().await {}
    assert_eq!(light_report(&dashboard), Some((false, 0)));
    assert!(!dashboard.is_animating());
}

#[test]
fn should_remove_first_registered_device_when_ids_collide() {
    let mut dashboard = Dashboard::new(DEFAULT_TICK_PERIOD);
    dashboard.add_device(DeviceKind::Camera, "X").unwrap();
    dashboard.add_device(DeviceKind::Thermostat, "X").unwrap();

    let removed = dashboard.remove_by_id(&DeviceId::from("X")).unwrap();

    assert_eq!(removed.kind(), DeviceKind::Camera);
    let kinds: Vec<DeviceKind> = dashboard.reports().iter().map(DeviceReport::kind).collect();
    assert_eq!(kinds, [DeviceKind::Thermostat]);
}

#[test]
fn should_render_scenario_summary() {
    let mut dashboard = Dashboard::new(DEFAULT_TICK_PERIOD);
    let thermostat = dashboard.add_device(DeviceKind::Thermostat, "T1").unwrap();
    let camera = dashboard.add_device(DeviceKind::Camera, "C1").unwrap();

    dashboard.toggle(&thermostat).unwrap();
    dashboard
        .set_temperature(&DeviceId::from("T1"), 22.5)
        .unwrap();
    dashboard.toggle(&camera).unwrap();

    let summary = dashboard.summary();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[0], "Thermostat T1: ON (Temperature: 22.5\u{2103})");
    assert!(lines[1].starts_with("Security Camera C1: ON (Security Status: "));
}

fn light_report(dashboard: &Dashboard) -> Option<(bool, u8)> {
    dashboard.reports().into_iter().find_map(|r| match r {
        DeviceReport::Light { on, brightness, .. } => Some((on, brightness)),
        _ => None,
    })
}
