use anyhow::Result;
use drive_core::{
    dummy::{DummyEnv, DummyEnvConfig, DummySpace},
    record::BufferedRecorder,
    Driver, DriverConfig, Env, Frame, FrameSink, RandomPolicy,
};

/// Keeps every frame and counts clears.
#[derive(Default)]
struct CollectSink {
    frames: Vec<Frame>,
    n_clears: usize,
}

impl FrameSink for CollectSink {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        assert_eq!(self.n_clears, self.frames.len() + 1, "clear must precede show");
        self.frames.push(frame.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.n_clears += 1;
        Ok(())
    }
}

fn build_env(episode_len: usize) -> Result<DummyEnv> {
    let config = DummyEnvConfig {
        episode_len,
        ..DummyEnvConfig::default()
    };
    DummyEnv::build(&config, 42)
}

#[test]
fn single_episode_resets_once_more() -> Result<()> {
    let mut env = build_env(5)?;
    let mut policy = RandomPolicy::new(DummySpace::new(3, 42));
    let mut sink = CollectSink::default();
    let mut recorder = BufferedRecorder::new();

    let driver = Driver::new(DriverConfig::default());
    let summary = driver.run(&mut env, &mut policy, &mut sink, &mut recorder)?;

    assert_eq!(summary.episodes, 1);
    assert_eq!(summary.steps, 5);
    assert_eq!(summary.returns, vec![5.0]);
    // initial reset plus the reset at the end of the episode
    assert_eq!(env.n_resets, 2);
    assert_eq!(env.n_renders, 5);
    assert_eq!(sink.frames.len(), 5);
    assert_eq!(sink.frames[4].data()[0], 5);
    assert_eq!(env.n_closes, 0);
    assert!(env.acts.iter().all(|a| (0..3).contains(&a.0)));
    Ok(())
}

#[test]
fn zero_episodes_does_not_step() -> Result<()> {
    let mut env = build_env(5)?;
    let mut policy = RandomPolicy::new(DummySpace::new(3, 42));
    let mut sink = CollectSink::default();
    let mut recorder = BufferedRecorder::new();
    let config: DriverConfig = serde_yaml::from_str("max_episodes: 0")?;
    assert_eq!(config.max_episodes, Some(0));

    let summary = Driver::new(config).run(&mut env, &mut policy, &mut sink, &mut recorder)?;

    assert_eq!(summary.episodes, 0);
    assert_eq!(summary.steps, 0);
    assert_eq!(env.n_resets, 1);
    assert_eq!(env.n_renders, 0);
    assert!(sink.frames.is_empty());
    assert!(recorder.is_empty());
    Ok(())
}

#[test]
fn records_steps_and_episodes() -> Result<()> {
    let mut env = build_env(3)?;
    let mut policy = RandomPolicy::new(DummySpace::new(2, 0));
    let mut sink = CollectSink::default();
    let mut recorder = BufferedRecorder::new();
    let config = DriverConfig::default().max_episodes(Some(2));

    Driver::new(config).run(&mut env, &mut policy, &mut sink, &mut recorder)?;

    // 3 step records per episode and one episode record
    assert_eq!(recorder.len(), 8);
    let records = recorder.iter().collect::<Vec<_>>();
    assert_eq!(records[0].get_scalar("step")?, 1.0);
    assert_eq!(records[0].get_scalar("reward")?, 1.0);
    assert!(records[0].get_array1("act").is_ok());
    assert_eq!(records[3].get_scalar("return")?, 3.0);
    assert_eq!(records[3].get_scalar("steps")?, 3.0);
    assert_eq!(records[7].get_scalar("episode")?, 1.0);
    Ok(())
}

#[test]
fn step_limit_stops_mid_episode() -> Result<()> {
    let mut env = build_env(10)?;
    let mut policy = RandomPolicy::new(DummySpace::new(2, 0));
    let mut sink = CollectSink::default();
    let mut recorder = BufferedRecorder::new();
    let config = DriverConfig::default().max_episodes(None).max_steps(Some(25));

    let driver = Driver::new(config);
    let summary = driver.run(&mut env, &mut policy, &mut sink, &mut recorder)?;

    assert_eq!(summary.steps, 25);
    assert_eq!(summary.episodes, 2);
    assert_eq!(env.n_resets, 3);
    assert_eq!(sink.frames.len(), 25);
    Ok(())
}

#[test]
fn no_reset_stops_after_first_episode() -> Result<()> {
    let mut env = build_env(4)?;
    let mut policy = RandomPolicy::new(DummySpace::new(2, 0));
    let mut sink = CollectSink::default();
    let mut recorder = BufferedRecorder::new();
    let config = DriverConfig::default().max_episodes(None).reset_on_done(false);

    let driver = Driver::new(config);
    let summary = driver.run(&mut env, &mut policy, &mut sink, &mut recorder)?;

    assert_eq!(summary.episodes, 1);
    assert_eq!(env.n_resets, 1);
    Ok(())
}

#[test]
fn truncation_ends_an_episode() -> Result<()> {
    let config = DummyEnvConfig {
        episode_len: 2,
        truncate: true,
        ..DummyEnvConfig::default()
    };
    let mut env = DummyEnv::build(&config, 0)?;
    let mut policy = RandomPolicy::new(DummySpace::new(2, 0));
    let mut sink = CollectSink::default();
    let mut recorder = BufferedRecorder::new();

    let driver = Driver::new(DriverConfig::default());
    let summary = driver.run(&mut env, &mut policy, &mut sink, &mut recorder)?;

    assert_eq!(summary.steps, 2);
    assert_eq!(summary.episodes, 1);
    Ok(())
}

#[test]
fn step_with_reset_sets_init_obs() -> Result<()> {
    let mut env = build_env(2)?;
    env.reset()?;
    let (step, _) = env.step_with_reset(&drive_core::dummy::DummyAct(0))?;
    assert!(step.init_obs.is_none());
    let (step, _) = env.step_with_reset(&drive_core::dummy::DummyAct(1))?;
    assert!(step.is_done());
    assert_eq!(step.init_obs, Some(drive_core::dummy::DummyObs(0)));
    Ok(())
}

#[test]
fn closed_env_refuses_to_step() -> Result<()> {
    let mut env = build_env(2)?;
    env.close()?;
    env.close()?;
    assert_eq!(env.n_closes, 1);
    assert!(env.reset().is_err());
    Ok(())
}
