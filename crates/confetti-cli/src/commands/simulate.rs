//! Draw-free simulation command for tuning effects

use super::EffectArgs;
use anyhow::Result;

pub fn run(effect: EffectArgs, seconds: f32) -> Result<()> {
    let mut system = effect.build_system()?;
    let size = effect.size();
    let dt = effect.dt();
    let steps = (seconds.max(0.0) / dt).ceil() as u32;

    println!("{:>8}  {:>8}", "time", "alive");
    let mut peak = 0;
    for step in 1..=steps {
        system.update(size, dt);
        peak = peak.max(system.alive_count());

        if step % effect.fps.max(1) == 0 || system.is_finished() {
            println!("{:>7.2}s  {:>8}", step as f32 * dt, system.alive_count());
        }
        if system.is_finished() {
            println!("All particles retired after {:.2}s", step as f32 * dt);
            break;
        }
    }
    println!("Peak alive: {}", peak);

    Ok(())
}
