//! Tests with a Python interpreter and gym installed.
//!
//! Run with `cargo test -p drive-py-gym-env -- --ignored`.
use anyhow::Result;
use drive_core::{
    record::NullRecorder, Driver, DriverConfig, Env as _, Frame, FrameSink, RandomPolicy, Render,
};
use drive_py_gym_env::{
    ArrayObsFilter, ArrayObsFilterConfig, GymAct, GymActRawFilter, GymActRawFilterConfig, GymEnv,
    GymEnvConfig, GymObs,
};

type ObsFilter = ArrayObsFilter<GymObs>;
type ActFilter = GymActRawFilter<GymAct>;
type Env = GymEnv<GymObs, GymAct, ObsFilter, ActFilter>;
type Config = GymEnvConfig<ArrayObsFilterConfig, GymActRawFilterConfig>;

fn cartpole_config() -> Config {
    Config::default()
        .name("CartPole-v1")
        .module_imports(vec![])
        .max_steps(Some(20))
}

#[derive(Default)]
struct CountSink(usize);

impl FrameSink for CountSink {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        assert!(frame.width() > 0 && frame.height() > 0);
        self.0 += 1;
        Ok(())
    }
}

#[test]
#[ignore]
fn render_returns_rgb_frame() -> Result<()> {
    let mut env = Env::build(&cartpole_config(), 0)?;
    env.reset()?;
    let frame = env.render()?;
    assert_eq!(frame.data().len(), (frame.width() * frame.height() * 3) as usize);
    env.close()?;
    Ok(())
}

#[test]
#[ignore]
fn random_policy_drives_one_episode() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut env = Env::build(&cartpole_config(), 0)?;
    let mut policy = RandomPolicy::new(env.act_space());
    let mut sink = CountSink::default();

    let summary = Driver::new(DriverConfig::default()).run(
        &mut env,
        &mut policy,
        &mut sink,
        &mut NullRecorder::default(),
    )?;

    assert_eq!(summary.episodes, 1);
    assert!(summary.steps <= 20);
    assert_eq!(sink.0, summary.steps);
    env.close()?;
    assert!(env.is_closed());
    assert!(env.reset().is_err());
    Ok(())
}

#[test]
fn config_roundtrips_through_yaml() -> Result<()> {
    let config = cartpole_config().render_mode(None);
    let yaml = serde_yaml::to_string(&config)?;
    let config_: Config = serde_yaml::from_str(&yaml)?;
    assert_eq!(config, config_);
    Ok(())
}

#[test]
fn default_config_targets_duckietown() {
    let config = Config::default();
    assert_eq!(config.name, "Duckietown-loop_obstacles-v0");
    assert_eq!(config.module_imports, vec!["gym_duckietown".to_string()]);
    assert_eq!(config.render_mode.as_deref(), Some("rgb_array"));
}
