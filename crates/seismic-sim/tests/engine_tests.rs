use std::thread;

use glam::{Vec3, Vec4};

use seismic_core::commands::SeismicCommand;
use seismic_core::config::SeismicConfig;
use seismic_core::enums::{EvictionPolicy, ShaderKeyword};
use seismic_core::state::PublishedState;
use seismic_core::SeismicError;
use seismic_sim::{RecordingSink, SeismicSense};

const DT: f32 = 1.0 / 60.0;

fn enabled(config: SeismicConfig) -> (SeismicSense, RecordingSink) {
    let mut sense = SeismicSense::new(config).unwrap();
    let mut sink = RecordingSink::new();
    sense.enable(&mut sink);
    (sense, sink)
}

// ---- Lifecycle ----

#[test]
fn test_tick_before_enable_fails() {
    let mut sense = SeismicSense::new(SeismicConfig::default()).unwrap();
    let mut sink = RecordingSink::new();
    assert!(matches!(sense.tick(DT, &mut sink), Err(SeismicError::NotEnabled)));
    assert!(matches!(sense.snapshot(), Err(SeismicError::NotEnabled)));
    assert!(sink.pushes.is_empty());
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = SeismicConfig {
        max_waves: 0,
        ..Default::default()
    };
    assert!(matches!(
        SeismicSense::new(config),
        Err(SeismicError::InvalidConfig { field: "max_waves", .. })
    ));
}

#[test]
fn test_enable_publishes_empty_state_and_keywords() {
    let (sense, sink) = enabled(SeismicConfig {
        max_waves: 6,
        transparent: true,
        ..Default::default()
    });

    assert!(sense.is_enabled());
    assert_eq!(sense.buffer().unwrap().capacity(), 6);
    assert_eq!(sink.pushes.len(), 1);
    assert_eq!(sink.pushes[0].active, 0);
    assert!(sink.keyword(ShaderKeyword::Transparent));
    assert!(!sink.keyword(ShaderKeyword::Displacement));
    assert_eq!(sink.keyword_calls.len(), 2);
}

#[test]
fn test_disable_releases_buffer_and_publishes_inactive() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    sense.add_wave(Vec3::ONE);
    sense.tick(DT, &mut sink).unwrap();
    assert_eq!(sink.last().unwrap().active, 1);

    sense.disable(&mut sink);
    assert!(!sense.is_enabled());
    assert!(sense.buffer().is_none());
    assert_eq!(sink.last(), Some(&PublishedState::inactive()));

    sense.enable(&mut sink);
    let state = sense.tick(DT, &mut sink).unwrap();
    assert_eq!(state.active, 0);
}

#[test]
fn test_reenable_resets_waves() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    sense.add_wave(Vec3::ONE);
    sense.tick(DT, &mut sink).unwrap();
    assert_eq!(sense.buffer().unwrap().active(), 1);

    sense.enable(&mut sink);
    assert_eq!(sense.buffer().unwrap().active(), 0);
}

// ---- Ticking ----

#[test]
fn test_add_wave_inserts_immediately() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    sense.add_wave(Vec3::new(3.0, 0.0, -1.0));
    assert_eq!(sense.buffer().unwrap().active(), 1);
    assert_eq!(sense.buffer().unwrap().slot(0).unwrap().elapsed, 0.0);

    let state = sense.tick(DT, &mut sink).unwrap();
    assert_eq!(state.active, 1);
    let waves = state.waves.as_ref().unwrap();
    assert_eq!(waves.center[0], Vec4::new(3.0, 0.0, -1.0, 1.0));
    assert_eq!(waves.timer[0], DT);
    assert_eq!(sink.last(), Some(&state));
}

#[test]
fn test_tick_pushes_every_frame() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    for _ in 0..10 {
        sense.tick(DT, &mut sink).unwrap();
    }
    assert_eq!(sink.pushes.len(), 11);
    assert!(sink.pushes.iter().all(|s| s.active == 0 && s.waves.is_none()));
}

#[test]
fn test_waves_expire_after_time_limit() {
    let (mut sense, mut sink) = enabled(SeismicConfig {
        wave_time_limit: 1.0,
        ..Default::default()
    });
    sense.add_wave(Vec3::ZERO);
    sense.tick(0.5, &mut sink).unwrap();
    assert_eq!(sense.snapshot().unwrap().active, 1);
    let state = sense.tick(0.75, &mut sink).unwrap();
    assert_eq!(state.active, 0);
    assert!(state.waves.is_none());
}

#[test]
fn test_invalid_dt_leaves_queues_untouched() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    sense.add_wave(Vec3::ONE);
    sense.queue_command(SeismicCommand::Disable);
    let pushes = sink.pushes.len();

    let err = sense.tick(-1.0, &mut sink).unwrap_err();
    assert!(matches!(err, SeismicError::InvalidArgument(_)));
    assert!(sense.is_enabled());
    assert_eq!(sense.buffer().unwrap().active(), 1);
    assert_eq!(sense.buffer().unwrap().slot(0).unwrap().elapsed, 0.0);
    assert_eq!(sink.pushes.len(), pushes);
}

// ---- Configuration ----

#[test]
fn test_keyword_change_is_immediate() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    sink.clear();

    let config = SeismicConfig {
        displacement: true,
        ..sense.config().clone()
    };
    sense.set_config(config, &mut sink).unwrap();

    assert_eq!(sink.keyword_calls, vec![(ShaderKeyword::Displacement, true)]);
    assert!(sink.pushes.is_empty(), "keywords must not wait for a tick");
}

#[test]
fn test_unchanged_keywords_not_resent() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    sink.clear();
    let config = SeismicConfig {
        wave_range: 20.0,
        ..sense.config().clone()
    };
    sense.set_config(config, &mut sink).unwrap();
    assert!(sink.keyword_calls.is_empty());
}

#[test]
fn test_config_change_keeps_in_flight_shape() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    sense.add_wave(Vec3::X);
    sense.tick(DT, &mut sink).unwrap();

    let config = SeismicConfig {
        wave_range: 42.0,
        ..sense.config().clone()
    };
    sense.set_config(config, &mut sink).unwrap();
    sense.add_wave(Vec3::Y);
    let state = sense.tick(DT, &mut sink).unwrap();

    let waves = state.waves.unwrap();
    assert_eq!(waves.range[0], 42.0);
    assert_eq!(waves.range[1], SeismicConfig::default().wave_range);
}

#[test]
fn test_invalid_config_rejected_and_previous_kept() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    let bad = SeismicConfig {
        wave_width: 0.0,
        transparent: true,
        ..Default::default()
    };
    assert!(sense.set_config(bad, &mut sink).is_err());
    assert_eq!(sense.config(), &SeismicConfig::default());
    assert!(!sink.keyword(ShaderKeyword::Transparent));
}

#[test]
fn test_capacity_change_deferred_until_enable() {
    let (mut sense, mut sink) = enabled(SeismicConfig {
        max_waves: 4,
        ..Default::default()
    });
    let config = SeismicConfig {
        max_waves: 8,
        ..sense.config().clone()
    };
    sense.set_config(config, &mut sink).unwrap();
    assert_eq!(sense.buffer().unwrap().capacity(), 4);

    sense.enable(&mut sink);
    assert_eq!(sense.buffer().unwrap().capacity(), 8);
}

#[test]
fn test_time_limit_update_applies_to_live_waves() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    sense.add_wave(Vec3::ZERO);
    sense.tick(2.0, &mut sink).unwrap();

    let config = SeismicConfig {
        wave_time_limit: 1.0,
        ..sense.config().clone()
    };
    sense.set_config(config, &mut sink).unwrap();
    let state = sense.tick(0.0, &mut sink).unwrap();
    assert_eq!(state.active, 0);
}

#[test]
fn test_wave_keeps_defaults_from_insert_time() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    sense.add_wave(Vec3::X);
    let config = SeismicConfig {
        wave_range: 30.0,
        ..sense.config().clone()
    };
    sense.set_config(config, &mut sink).unwrap();

    let state = sense.tick(0.0, &mut sink).unwrap();
    let waves = state.waves.unwrap();
    assert_eq!(waves.range[0], SeismicConfig::default().wave_range);
}

#[test]
fn test_add_wave_command_keeps_defaults_from_queue_time() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    sense.queue_commands([
        SeismicCommand::AddWave { point: Vec3::Z },
        SeismicCommand::SetConfig {
            config: SeismicConfig {
                wave_range: 30.0,
                ..Default::default()
            },
        },
    ]);

    let state = sense.tick(0.0, &mut sink).unwrap();
    let waves = state.waves.unwrap();
    assert_eq!(waves.center[0], Vec4::new(0.0, 0.0, 1.0, 1.0));
    assert_eq!(waves.range[0], SeismicConfig::default().wave_range);
    assert_eq!(sense.config().wave_range, 30.0);
}

#[test]
fn test_impacts_before_enable_are_discarded() {
    let mut sense = SeismicSense::new(SeismicConfig::default()).unwrap();
    let mut sink = RecordingSink::new();
    sense.add_wave(Vec3::X);
    assert!(sense.impact_sender().send(Vec3::Y));

    sense.enable(&mut sink);
    let state = sense.tick(0.0, &mut sink).unwrap();
    assert_eq!(state.active, 0);
}

// ---- Commands ----

#[test]
fn test_commands_processed_at_tick_boundary() {
    let mut sense = SeismicSense::new(SeismicConfig::default()).unwrap();
    let mut sink = RecordingSink::new();
    sense.queue_commands([
        SeismicCommand::Enable,
        SeismicCommand::AddWave { point: Vec3::ONE },
        SeismicCommand::SetConfig {
            config: SeismicConfig {
                displacement: true,
                ..Default::default()
            },
        },
    ]);
    assert!(!sense.is_enabled());

    let state = sense.tick(DT, &mut sink).unwrap();
    assert_eq!(state.active, 1);
    assert!(sink.keyword(ShaderKeyword::Displacement));
}

#[test]
fn test_commands_and_direct_calls_keep_call_order() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);
    sense.queue_command(SeismicCommand::AddWave { point: x });
    sense.add_wave(y);

    let waves = sense.tick(0.0, &mut sink).unwrap().waves.unwrap();
    assert_eq!(waves.center[0], y.extend(1.0));
    assert_eq!(waves.center[1], x.extend(1.0));
}

#[test]
fn test_add_wave_waits_behind_pending_commands() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    let w = Vec3::new(0.0, 0.0, 5.0);
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);

    sense.add_wave(w);
    sense.queue_command(SeismicCommand::SetConfig {
        config: SeismicConfig {
            wave_range: 30.0,
            ..Default::default()
        },
    });
    sense.queue_command(SeismicCommand::AddWave { point: x });
    sense.add_wave(y);
    assert_eq!(sense.buffer().unwrap().active(), 1);

    let waves = sense.tick(0.0, &mut sink).unwrap().waves.unwrap();
    assert_eq!(
        &waves.center[..3],
        &[y.extend(1.0), x.extend(1.0), w.extend(1.0)]
    );
    assert_eq!(&waves.range[..3], &[30.0, 30.0, SeismicConfig::default().wave_range]);
}

#[test]
fn test_invalid_set_config_command_is_ignored() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    sense.queue_command(SeismicCommand::SetConfig {
        config: SeismicConfig {
            wave_time_limit: 100.0,
            ..Default::default()
        },
    });
    sense.tick(DT, &mut sink).unwrap();
    assert_eq!(sense.config().wave_time_limit, SeismicConfig::default().wave_time_limit);
}

#[test]
fn test_disable_command_stops_ticking() {
    let (mut sense, mut sink) = enabled(SeismicConfig::default());
    sense.add_wave(Vec3::ONE);
    sense.queue_command(SeismicCommand::Disable);
    assert!(matches!(sense.tick(DT, &mut sink), Err(SeismicError::NotEnabled)));
    assert_eq!(sink.last(), Some(&PublishedState::inactive()));
}

// ---- Threading ----

#[test]
fn test_impacts_from_other_threads() {
    let (mut sense, mut sink) = enabled(SeismicConfig {
        max_waves: 64,
        ..Default::default()
    });

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let sender = sense.impact_sender();
            thread::spawn(move || {
                for i in 0..10 {
                    assert!(sender.send(Vec3::new(t as f32, i as f32, 0.0)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let state = sense.tick(DT, &mut sink).unwrap();
    assert_eq!(state.active, 40);
}

#[test]
fn test_overflowing_queue_keeps_newest() {
    let (mut sense, mut sink) = enabled(SeismicConfig {
        max_waves: 2,
        ..Default::default()
    });
    for i in 0..5 {
        sense.add_wave(Vec3::splat(i as f32));
    }
    let state = sense.tick(0.0, &mut sink).unwrap();
    assert_eq!(state.active, 2);
    let waves = state.waves.unwrap();
    assert_eq!(waves.center[0], Vec4::new(4.0, 4.0, 4.0, 1.0));
    assert_eq!(waves.center[1], Vec4::new(3.0, 3.0, 3.0, 1.0));
}

// ---- Determinism ----

#[test]
fn test_same_inputs_same_snapshots() {
    let config = SeismicConfig {
        max_waves: 5,
        wave_time_limit: 0.5,
        eviction: EvictionPolicy::OnePerTick,
        ..Default::default()
    };
    let (mut a, mut sink_a) = enabled(config.clone());
    let (mut b, mut sink_b) = enabled(config);

    for frame in 0..600 {
        if frame % 7 == 0 {
            let p = Vec3::new(frame as f32, (frame % 3) as f32, 0.0);
            a.add_wave(p);
            b.add_wave(p);
        }
        let snap_a = a.tick(DT, &mut sink_a).unwrap();
        let snap_b = b.tick(DT, &mut sink_b).unwrap();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged at frame {frame}");
    }
}
