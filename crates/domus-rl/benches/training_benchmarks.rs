//! Q-learning benchmarks
//!
//! Hot paths:
//! 1. QLearningAgent::choose_action - called once per simulation step
//! 2. QLearningAgent::update - called once per simulation step
//! 3. MowerEnv::step - device transition plus reward shaping
//! 4. Trainer::run - whole-run throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use domus_rl::{
    Environment, MowerAction, MowerEnv, QLearningAgent, Trainer, TrainerConfig,
};

fn trained_agent(steps: usize) -> (MowerEnv, QLearningAgent<domus_rl::MowerObs, MowerAction>) {
    let mut env = MowerEnv::new(1);
    let mut agent = QLearningAgent::new(MowerAction::ALL.to_vec(), 2);
    let mut state = env.reset();
    for _ in 0..steps {
        let action = agent.choose_action(&state);
        let (next, reward) = env.step(&action);
        agent.update(state, action, reward, &next);
        state = next;
    }
    (env, agent)
}

fn bench_choose_action(c: &mut Criterion) {
    let (mut env, mut agent) = trained_agent(5000);
    let state = env.reset();

    c.bench_function("choose_action", |b| {
        b.iter(|| black_box(agent.choose_action(black_box(&state))));
    });
}

fn bench_update(c: &mut Criterion) {
    let (mut env, mut agent) = trained_agent(5000);
    let state = env.reset();
    let (next, reward) = env.step(&MowerAction::StartMowing);

    c.bench_function("q_update", |b| {
        b.iter(|| {
            agent.update(
                black_box(state),
                black_box(MowerAction::StartMowing),
                black_box(reward),
                black_box(&next),
            );
        });
    });
}

fn bench_env_step(c: &mut Criterion) {
    let mut env = MowerEnv::new(3);
    env.reset();

    c.bench_function("mower_env_step", |b| {
        b.iter(|| black_box(env.step(black_box(&MowerAction::StartMowing))));
    });
}

fn bench_training_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("training_run");
    for episodes in [50, 200] {
        group.throughput(Throughput::Elements(episodes as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(episodes),
            &episodes,
            |b, &episodes| {
                b.iter(|| {
                    let config = TrainerConfig {
                        episodes,
                        max_steps: 24,
                        seed: 7,
                    };
                    let mut env = MowerEnv::new(config.seed);
                    let mut agent =
                        QLearningAgent::new(MowerAction::ALL.to_vec(), config.seed.wrapping_add(1));
                    black_box(Trainer::new(config).run(&mut env, &mut agent))
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_choose_action,
    bench_update,
    bench_env_step,
    bench_training_run
);
criterion_main!(benches);
