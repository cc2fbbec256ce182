use std::time::Instant;

use crate::simulation::integrator::integrate_step;
use crate::simulation::params::Parameters;
use crate::simulation::states::Body;
use crate::simulation::telemetry::SampleBuffer;

fn bench_params() -> Parameters {
    Parameters {
        gravity: -9.81,
        restitution: 0.9,
        start_height: 1.4,
        visible_height: 2.0,
        radius: 0.05,
        dt_max: Parameters::DT_MAX,
        rest_speed: 0.2,
        peak_eps: 1e-3,
    }
}

/// Integrator throughput at several step sizes.
///
/// The body is re-released whenever it comes to rest so every iteration
/// exercises the full kick/drift/contact path.
pub fn bench_step() {
    let params = bench_params();
    let steps = 1_000_000usize;

    for dt in [0.05, 0.01, 0.001] {
        let mut body = Body::released_at(params.start_height);

        // Warm up
        for _ in 0..1000 {
            integrate_step(&mut body, dt, &params);
        }
        body = Body::released_at(params.start_height);

        let t0 = Instant::now();
        for _ in 0..steps {
            let outcome = integrate_step(&mut body, dt, &params);
            if outcome.at_rest {
                body = Body::released_at(params.start_height);
            }
        }
        let elapsed = t0.elapsed().as_secs_f64();

        println!(
            "dt = {dt:6.3} s, steps = {steps:8}, elapsed = {elapsed:8.6} s, {:7.1} M steps/s",
            steps as f64 / elapsed / 1e6
        );
    }
}

/// Ring-buffer push throughput at several capacities.
pub fn bench_telemetry() {
    let pushes = 10_000_000usize;

    for capacity in [600, 6_000, 60_000] {
        let mut buf = SampleBuffer::with_capacity(capacity);

        // Warm up
        for i in 0..capacity {
            buf.push(i as f64, 0.0);
        }

        let t0 = Instant::now();
        for i in 0..pushes {
            buf.push(i as f64 * 0.01, 1.0);
        }
        let elapsed = t0.elapsed().as_secs_f64();

        println!(
            "capacity = {capacity:6}, pushes = {pushes:9}, elapsed = {elapsed:8.6} s, {:7.1} M pushes/s",
            pushes as f64 / elapsed / 1e6
        );
    }
}
