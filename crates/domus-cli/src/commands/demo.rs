//! Device demo sequences

use anyhow::Result;
use clap::Subcommand;

use domus_core::{Fan, Lock, Mower};

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Mow, fault, recover
    Mower,
    /// Speed, presets, oscillation, direction
    Fan,
    /// Lock/unlock plus a deliberate conflict jam
    Lock,
}

pub async fn run(cmd: DemoCommands) -> Result<()> {
    match cmd {
        DemoCommands::Mower => mower_demo(),
        DemoCommands::Fan => fan_demo().await,
        DemoCommands::Lock => lock_demo().await,
    }
    Ok(())
}

fn mower_demo() {
    let mut mower = Mower::new("Backyard Mower");
    println!("initial activity: {}", mower.activity());

    println!("{}", mower.start_mowing());
    println!("{}", mower.pause());
    println!("{}", mower.resume());
    println!("{}", mower.set_error("Blade jam detected"));
    println!("{}", mower.start_mowing());
    println!("{}", mower.clear_error());
    println!("{}", mower.start_mowing());

    println!(
        "final activity: {}, error: {}",
        mower.activity(),
        mower.error_message().unwrap_or("none")
    );
}

async fn fan_demo() {
    let mut fan = Fan::new("Living Room Fan");
    println!(
        "initial state: on={}, speed={}%, preset={}",
        fan.is_on(),
        fan.percentage(),
        fan.preset_mode().unwrap_or("none")
    );

    println!("{}", fan.turn_on(Some(50), Some("eco")));
    println!("{}", fan.oscillate(true));
    println!("{}", fan.set_direction("forward"));
    println!("{}", fan.set_preset_mode(Some("hurricane")));
    println!("{}", fan.turn_off());

    println!("{}", fan.turn_on_async(Some(80), Some("turbo")).await);
    println!("{}", fan.set_direction_async("reverse").await);
    println!("{}", fan.turn_off_async().await);

    println!(
        "final state: on={}, speed={}%, oscillating={}, direction={}",
        fan.is_on(),
        fan.percentage(),
        fan.oscillating(),
        fan.direction().unwrap_or("none")
    );
}

async fn lock_demo() {
    let lock = Lock::new("Front Door");
    println!("initial state: {:?}", lock.status());

    println!("{}", lock.lock_async(Some("1234")).await);
    println!("{}", lock.unlock_async(None).await);

    // Two overlapping requests trigger the conflict rule.
    let (first, second) = tokio::join!(lock.lock_async(Some("1111")), lock.unlock_async(Some("2222")));
    println!("{first}");
    println!("{second}");
    println!("after conflict: {:?}", lock.status());

    println!("{}", lock.clear_jam());
    println!("after clearing jam: {:?}", lock.status());
}
