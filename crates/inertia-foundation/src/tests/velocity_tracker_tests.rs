use super::*;

fn sample(velocity: f32, timestamp_ms: u64) -> VelocitySample {
    VelocitySample {
        velocity,
        timestamp_ms,
    }
}

#[test]
fn sampler_throttles_to_interval() {
    let config = GestureConfig::default();
    let mut sampler = VelocitySampler::new(&config);
    sampler.reset(100.0, 0);

    assert!(sampler.on_move(110.0, 8).is_none(), "too soon after reset");
    assert_eq!(sampler.last_y(), 100.0, "ignored tick leaves state alone");

    let recorded = sampler.on_move(110.0, 16).expect("tick at interval records");
    assert_eq!(recorded.velocity, 10.0);
    assert_eq!(sampler.last_sample_time(), 16);
}

#[test]
fn jitter_is_dropped_but_advances_last_position() {
    let config = GestureConfig::default();
    let mut sampler = VelocitySampler::new(&config);
    sampler.reset(100.0, 0);

    assert!(sampler.on_move(100.2, 16).is_none());
    assert!(sampler.samples().is_empty());
    assert_eq!(sampler.last_y(), 100.2);
    assert_eq!(sampler.last_sample_time(), 16);

    let recorded = sampler.on_move(105.2, 32).expect("real movement recorded");
    assert!((recorded.velocity - 5.0).abs() < 1e-4);
}

#[test]
fn buffer_never_exceeds_capacity_and_evicts_oldest() {
    let config = GestureConfig::default();
    let mut sampler = VelocitySampler::new(&config);
    sampler.reset(0.0, 0);

    let mut y = 0.0;
    for tick in 1..=40u64 {
        y += tick as f32;
        sampler.on_move(y, tick * 16);
        assert!(sampler.samples().len() <= MAX_SAMPLES_DEFAULT);
    }

    let samples = sampler.samples();
    assert_eq!(samples.len(), MAX_SAMPLES_DEFAULT);
    assert_eq!(samples.first().map(|s| s.timestamp_ms), Some(34 * 16));
    assert_eq!(samples.last().map(|s| s.timestamp_ms), Some(40 * 16));
}

const MAX_SAMPLES_DEFAULT: usize = crate::gesture_constants::MAX_VELOCITY_SAMPLES;

#[test]
fn custom_capacity_is_respected() {
    let config = GestureConfig::default().with_max_samples(3);
    let mut sampler = VelocitySampler::new(&config);
    sampler.reset(0.0, 0);
    for tick in 1..=10u64 {
        sampler.on_move(tick as f32 * 5.0, tick * 16);
    }
    assert_eq!(sampler.samples().len(), 3);
}

#[test]
fn uniform_samples_average_to_their_velocity() {
    let samples: Vec<_> = (0..5).map(|i| sample(2.0, 100 + i * 16)).collect();
    let average = weighted_recent_velocity(&samples, 170, 80).expect("recent samples");
    assert!((average - 2.0).abs() < 1e-6);

    let seed = estimate_release_velocity(&samples, 170, &GestureConfig::default())
        .expect("seed above minimum");
    assert!((seed - 1.8).abs() < 1e-5, "seed was {seed}");
}

#[test]
fn recent_sample_dominates() {
    let samples = [sample(1.0, 100), sample(1.0, 116), sample(9.0, 132)];
    let average = weighted_recent_velocity(&samples, 140, 80).expect("recent samples");
    // (1*1 + 1*2 + 9*4) / 7
    assert!((average - 39.0 / 7.0).abs() < 1e-5);
}

#[test]
fn stale_samples_are_ignored() {
    let samples = [sample(-50.0, 0), sample(4.0, 150), sample(4.0, 166)];
    let average = weighted_recent_velocity(&samples, 170, 80).expect("two recent samples");
    assert!((average - 4.0).abs() < 1e-6);

    assert!(weighted_recent_velocity(&samples, 1_000, 80).is_none());
    assert!(estimate_release_velocity(&samples, 1_000, &GestureConfig::default()).is_none());
}

#[test]
fn seed_is_clamped_to_max_velocity() {
    let config = GestureConfig::default();
    assert_eq!(clamp_seed_velocity(25.0, &config), Some(20.0));
    assert_eq!(clamp_seed_velocity(-25.0, &config), Some(-20.0));
}

#[test]
fn small_seed_does_not_start_momentum() {
    let config = GestureConfig::default();
    assert_eq!(clamp_seed_velocity(0.4, &config), None);
    assert_eq!(clamp_seed_velocity(-0.4, &config), None);
    assert_eq!(clamp_seed_velocity(f32::NAN, &config), None);
}

#[test]
fn negative_drag_gives_negative_seed() {
    let samples: Vec<_> = (0..4).map(|i| sample(-10.0, 200 + i * 16)).collect();
    let seed = estimate_release_velocity(&samples, 250, &GestureConfig::default())
        .expect("fast upward drag");
    assert!((seed + 9.0).abs() < 1e-5);
}
