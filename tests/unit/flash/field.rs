use super::*;

fn small_cfg() -> FieldConfig {
    FieldConfig {
        width: 200.0,
        height: 200.0,
        perimeter: 15.0,
        walks_per_frame: 16,
        step_scale: 40.0,
        min_step: 4.0,
        seed: 42,
        ..FieldConfig::default()
    }
}

fn loud() -> BlockEnergy {
    BlockEnergy {
        rms: 0.5,
        spectrum: None,
    }
}

#[test]
fn default_config_is_valid() {
    FieldConfig::default().validate().unwrap();
}

#[test]
fn validate_rejects_bad_values() {
    let bad = [
        FieldConfig {
            width: 0.0,
            ..FieldConfig::default()
        },
        FieldConfig {
            mix: 1.5,
            ..FieldConfig::default()
        },
        FieldConfig {
            thickness: -1.0,
            ..FieldConfig::default()
        },
        FieldConfig {
            perimeter: f64::NAN,
            ..FieldConfig::default()
        },
        FieldConfig {
            spawn: SpawnTarget::Spectrum { bins: 0 },
            ..FieldConfig::default()
        },
        FieldConfig {
            width: 40.0,
            height: 30.0,
            perimeter: 20.0,
            ..FieldConfig::default()
        },
    ];
    for cfg in bad {
        assert!(matches!(cfg.validate(), Err(FlashError::Validation(_))));
        assert!(FlashField::new(cfg).is_err());
    }
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let cfg = FieldConfig::from_json(
        r#"{"width": 320, "height": 240, "step_policy": "exponential",
            "spawn": {"kind": "spectrum", "bins": 12}}"#,
    )
    .unwrap();
    assert_eq!(cfg.width, 320.0);
    assert_eq!(cfg.step_policy, StepPolicy::Exponential);
    assert_eq!(cfg.spawn, SpawnTarget::Spectrum { bins: 12 });
    assert_eq!(cfg.walks_per_frame, FieldConfig::default().walks_per_frame);
}

#[test]
fn json_errors_are_classified() {
    assert!(matches!(
        FieldConfig::from_json("{\"width\": "),
        Err(FlashError::Serde(_))
    ));
    assert!(matches!(
        FieldConfig::from_json("{\"wdith\": 3}"),
        Err(FlashError::Serde(_))
    ));
    assert!(matches!(
        FieldConfig::from_json("{\"mix\": 2.0}"),
        Err(FlashError::Validation(_))
    ));
}

#[test]
fn step_policies_scale_with_energy() {
    assert_eq!(StepPolicy::Linear.step_length(0.5, 10.0, 0.0), 5.0);
    assert_eq!(StepPolicy::Linear.step_length(0.0, 10.0, 2.0), 2.0);
    let e1 = StepPolicy::Exponential.step_length(1.0, 10.0, 0.0);
    assert!((e1 - 10.0).abs() < 1e-9);
    let quiet = StepPolicy::Exponential.step_length(0.2, 10.0, 0.0);
    assert!(quiet < StepPolicy::Linear.step_length(0.2, 10.0, 0.0));
    assert_eq!(StepPolicy::Linear.step_length(f64::NAN, 10.0, 1.5), 1.5);
}

#[test]
fn walking_grows_the_active_bolt() {
    let mut field = FlashField::new(small_cfg()).unwrap();
    assert_eq!(field.step(&loud(), 0.0), FieldStep::Walked);
    assert_eq!(field.active().nodes().len(), 2);
    assert!(field.retired().is_empty());
}

#[test]
fn spent_bolts_retire_and_respawn_from_their_last_node() {
    let mut field = FlashField::new(small_cfg()).unwrap();
    let mut respawned = false;
    for _ in 0..2_000 {
        let before = field.active().current_point();
        if field.step(&loud(), 0.0) == FieldStep::Respawned {
            respawned = true;
            assert_eq!(field.active().start(), before);
            assert_eq!(field.active().nodes().len(), 1);
            assert_eq!(field.retired().len(), 1);
            // The first bolt climbed to the top, so the successor heads for the bottom.
            assert_eq!(field.active().end(), Point::new(100.0, 200.0));
            break;
        }
    }
    assert!(respawned);
    assert_eq!(field.spawned(), 2);
}

#[test]
fn retired_list_is_bounded() {
    let cfg = FieldConfig {
        max_retired: 2,
        ..small_cfg()
    };
    let mut field = FlashField::new(cfg).unwrap();
    for _ in 0..20_000 {
        field.step(&loud(), 0.0);
        if field.spawned() > 5 {
            break;
        }
    }
    assert!(field.spawned() > 5);
    assert_eq!(field.retired().len(), 2);
    assert_eq!(field.outlines().len(), 3);
}

#[test]
fn spectrum_spawn_aims_at_peak_bin_height() {
    let cfg = FieldConfig {
        spawn: SpawnTarget::Spectrum { bins: 4 },
        ..small_cfg()
    };
    let mut field = FlashField::new(cfg).unwrap();
    let energy = BlockEnergy {
        rms: 0.5,
        spectrum: Some(vec![0.0, 0.1, 0.9, 0.2]),
    };
    for _ in 0..2_000 {
        if field.step(&energy, 0.0) == FieldStep::Respawned {
            // Bin 2 of 4: y = 200 * (1 - 2.5 / 4).
            assert_eq!(field.active().end(), Point::new(100.0, 75.0));
            return;
        }
    }
    panic!("bolt never reached its target");
}

#[test]
fn advance_frame_spends_the_walk_budget() {
    // A zero perimeter can never be reached, so every step walks.
    let cfg = FieldConfig {
        perimeter: 0.0,
        ..small_cfg()
    };
    let mut field = FlashField::new(cfg).unwrap();
    let block = vec![0.25f32; 64];
    field.advance_frame(&block, &loud(), Reflect::for_channel(1));
    assert_eq!(field.active().nodes().len(), 17);
    field.advance_frame(&[], &BlockEnergy::silent(), Reflect::IDENTITY);
    assert_eq!(field.active().nodes().len(), 33);
    assert!(field.outlines().iter().all(|o| o.is_closed()));
}

#[test]
fn same_seed_gives_same_field() {
    let run = || {
        let mut field = FlashField::new(small_cfg()).unwrap();
        for _ in 0..10 {
            field.advance_frame(&[0.1, -0.3, 0.7], &loud(), Reflect::IDENTITY);
        }
        field.outlines()
    };
    assert_eq!(run(), run());
}

#[test]
fn respawned_bolts_always_walk_before_retiring_again() {
    // Largest perimeter the canvas allows: the anchor sits exactly on the retire radius.
    let cfg = FieldConfig {
        width: 40.0,
        height: 40.0,
        perimeter: 20.0,
        step_scale: 10.0,
        seed: 5,
        ..FieldConfig::default()
    };
    let mut field = FlashField::new(cfg).unwrap();
    let mut last = FieldStep::Walked;
    let mut respawns = 0;
    for _ in 0..1_000 {
        let step = field.step(&loud(), 0.0);
        if step == FieldStep::Respawned {
            assert_eq!(last, FieldStep::Walked, "respawned twice in a row");
            respawns += 1;
        }
        last = step;
    }
    assert!(respawns > 0);
}
