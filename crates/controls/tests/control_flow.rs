//! End-to-end tests for the slider -> debounce -> request -> chart cycle

use playground_controls::{
    ChartSurface, ClickTarget, PanelDispatcher, Reconciled, SettingsField, SettingsPanel,
    SliderWidget, UpdateController,
};
use playground_shared::{
    PlaygroundResult, PlotPayload, Scale, SliderDefinition, Trace, TraceVisibility,
    VisibilitySnapshot,
};
use serde_json::json;

/// Chart double that records every repaint
#[derive(Default)]
struct MockChart {
    current: PlotPayload,
    repaints: Vec<PlotPayload>,
}

impl ChartSurface for MockChart {
    fn visibility_snapshot(&self) -> VisibilitySnapshot {
        self.current.traces.iter().map(|t| t.visible.clone()).collect()
    }

    fn repaint(&mut self, payload: &PlotPayload) -> PlaygroundResult<()> {
        self.current = payload.clone();
        self.repaints.push(payload.clone());
        Ok(())
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn server_response(count: usize, value: f64) -> PlotPayload {
    let raw = json!({
        "traces": (0..count)
            .map(|i| json!({
                "type": "scatter",
                "mode": "lines",
                "x": [0, 1],
                "y": [value, value * i as f64],
            }))
            .collect::<Vec<_>>(),
        "layout": {"title": "Michaelis-Menten"}
    });
    serde_json::from_value(raw).unwrap()
}

/// Single re-armable timeout, like the one the browser glue keeps per slider
#[derive(Default)]
struct ReArmedTimer {
    deadline: Option<f64>,
}

impl ReArmedTimer {
    fn arm(&mut self, deadline: f64) {
        self.deadline = Some(deadline);
    }

    /// Whether the timer fires by `now`; a fired timer is disarmed
    fn elapsed(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

fn widget(name: &str, min: f64, max: f64, value: f64) -> SliderWidget {
    SliderWidget::new(SliderDefinition::with_default_steps(name, min, max, value), 2).unwrap()
}

#[test]
fn test_burst_of_inputs_sends_one_request_with_last_value() {
    init_logging();
    let chart = MockChart::default();
    let mut slider = widget("Vmax", 0.0, 10.0, 1.0);
    let mut controller = UpdateController::default();
    let mut timer = ReArmedTimer::default();
    let mut sent = Vec::new();

    // 5 events within 100 ms, each re-arming the timeout
    for (i, now) in [0.0, 25.0, 50.0, 75.0, 100.0].into_iter().enumerate() {
        assert!(!timer.elapsed(now));
        let update = slider.on_input(1.0 + i as f64);
        timer.arm(controller.schedule(update, now));
    }

    for now in (100..=1000).step_by(50) {
        if timer.elapsed(now as f64) {
            sent.extend(controller.fire("Vmax", &chart));
        }
    }

    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].sequence, 1);
    assert_eq!(sent[0].update.param_name, "Vmax");
    assert_eq!(sent[0].update.param_value, 5.0);
    assert_eq!(slider.value_label(), "5.00e+0");
}

#[test]
fn test_inputs_after_quiet_period_send_again() {
    init_logging();
    let chart = MockChart::default();
    let mut slider = widget("Km", 0.0, 10.0, 1.0);
    let mut controller = UpdateController::default();

    let deadline = controller.schedule(slider.on_input(2.0), 0.0);
    assert_eq!(deadline, 300.0);
    let first = controller.fire("Km", &chart).unwrap();

    let deadline = controller.schedule(slider.on_input(4.0), 400.0);
    assert_eq!(deadline, 700.0);
    let second = controller.fire("Km", &chart).unwrap();

    assert_eq!((first.sequence, first.update.param_value), (1, 2.0));
    assert_eq!((second.sequence, second.update.param_value), (2, 4.0));
    assert!(controller.fire("Km", &chart).is_none());
}

#[test]
fn test_legendonly_survives_update() {
    init_logging();
    let mut chart = MockChart::default();
    let mut controller = UpdateController::default();

    let mut initial = server_response(2, 1.0);
    initial.traces[1].visible = Some(TraceVisibility::legend_only());
    chart.repaint(&initial).unwrap();

    let mut slider = widget("Km", 0.0, 10.0, 1.0);
    controller.schedule(slider.on_input(3.0), 0.0);
    let dispatched = controller.fire("Km", &chart).unwrap();

    let response = server_response(2, 3.0);
    assert!(response.traces.iter().all(|t| t.visible.is_none()));

    let outcome = controller.reconcile(&dispatched, response, &mut chart).unwrap();
    assert_eq!(outcome, Reconciled::Applied { restored: 1 });
    assert_eq!(chart.current.traces[0].visible, None);
    assert_eq!(chart.current.traces[1].visible, Some(TraceVisibility::legend_only()));
    assert_eq!(chart.current.layout["title"], "Michaelis-Menten");
}

#[test]
fn test_slow_response_does_not_overwrite_newer_one() {
    init_logging();
    let mut chart = MockChart::default();
    let mut controller = UpdateController::default();

    controller.schedule(playground_shared::ParameterUpdate::new("a", 1.0), 0.0);
    let slow = controller.fire("a", &chart).unwrap();
    controller.schedule(playground_shared::ParameterUpdate::new("a", 2.0), 310.0);
    let fast = controller.fire("a", &chart).unwrap();

    controller.reconcile(&fast, server_response(1, 2.0), &mut chart).unwrap();
    let outcome = controller
        .reconcile(&slow, server_response(1, 1.0), &mut chart)
        .unwrap();

    assert_eq!(outcome, Reconciled::Stale { latest: 2 });
    assert_eq!(chart.repaints.len(), 1);
    assert_eq!(chart.current.traces[0].fields.get("y"), Some(&json!([2.0, 0.0])));
}

#[test]
fn test_settings_flow_with_shared_dispatcher() {
    init_logging();
    let mut dispatcher = PanelDispatcher::new();
    let mut widgets = Vec::new();
    let mut panels = Vec::new();

    for name in ["a", "b", "c"] {
        let slider = widget(name, 100.0, 10000.0, 1000.0);
        let panel = SettingsPanel::new(&slider);
        dispatcher.register(panel.id());
        widgets.push(slider);
        panels.push(panel);
    }
    assert!(panels.iter().all(|p| !dispatcher.is_open(p.id())));

    // Open b, clicking its toggle does not close it
    dispatcher.toggle_clicked(panels[1].id(), false);
    dispatcher.document_clicked(ClickTarget::Toggle(panels[1].id()));
    assert!(dispatcher.is_open(panels[1].id()));

    // Bad edit keeps it open
    panels[1].set_field(SettingsField::Min, "20000");
    assert!(panels[1].submit(&mut widgets[1], &mut dispatcher).is_err());
    assert!(dispatcher.is_open(panels[1].id()));

    // Fix and switch to log
    panels[1].set_field(SettingsField::Min, "100");
    panels[1].toggle_scale();
    let range = panels[1].submit(&mut widgets[1], &mut dispatcher).unwrap();
    assert!(!dispatcher.is_open(panels[1].id()));
    assert_eq!(widgets[1].scale(), Scale::Log);
    assert!((range.min - 2.0).abs() < 1e-12);
    assert!((range.max - 4.0).abs() < 1e-12);
    assert!((range.value - 3.0).abs() < 1e-12);

    // Dragging a log slider reports real values
    let update = widgets[1].on_input(3.5);
    assert!((update.param_value - 10f64.powf(3.5)).abs() < 1e-6);

    // Other sliders are untouched
    assert_eq!(widgets[0].scale(), Scale::Linear);
    assert_eq!(widgets[2].value(), 1000.0);
}

#[test]
fn test_linear_and_log_round_trip_over_range() {
    for scale in [Scale::Linear, Scale::Log] {
        let definition =
            SliderDefinition::with_default_steps("x", 0.5, 500.0, 1.0).with_scale(scale);
        let mut slider = SliderWidget::new(definition, 3).unwrap();
        let transform = slider.state().transform();

        for i in 0..=20 {
            let value = 0.5 + (500.0 - 0.5) * i as f64 / 20.0;
            let update = slider.on_input(transform.to_position(value));
            let tolerance = if scale == Scale::Linear { 0.0 } else { 1e-9 * value };
            assert!((update.param_value - value).abs() <= tolerance, "{scale}: {value}");
        }
    }
}

#[test]
fn test_trace_fields_survive_merge() {
    let snapshot = vec![Some(TraceVisibility::legend_only())];
    let mut payload = PlotPayload {
        traces: vec![
            serde_json::from_value::<Trace>(json!({"name": "rate", "y": [1, 2]})).unwrap(),
        ],
        layout: json!({}),
    };
    playground_controls::merge_visibility(&snapshot, &mut payload);

    assert_eq!(
        serde_json::to_value(&payload.traces[0]).unwrap(),
        json!({"name": "rate", "y": [1, 2], "visible": "legendonly"})
    );
}
