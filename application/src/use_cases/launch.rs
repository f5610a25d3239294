//! Launch use case.
//!
//! Builds the launch spec from the resolved configuration plus the
//! environment prepared by provisioning, then hands it to the process
//! launcher. The returned exit code is the supervisor's exit code.

use crate::config::AppConfig;
use crate::ports::launcher::{LaunchError, ProcessLauncher};
use roost_domain::LaunchSpec;
use std::sync::Arc;
use tracing::info;

pub struct LaunchUseCase<L: ProcessLauncher> {
    launcher: Arc<L>,
}

impl<L: ProcessLauncher> LaunchUseCase<L> {
    pub fn new(launcher: Arc<L>) -> Self {
        Self { launcher }
    }

    pub async fn execute(
        &self,
        config: &AppConfig,
        env_additions: Vec<(String, String)>,
    ) -> Result<i32, LaunchError> {
        let mut spec = LaunchSpec::new(&config.interpreter, &config.entry)
            .with_working_dir(&config.working_dir);

        for (key, value) in &config.env_overrides {
            spec = spec.with_env(key, value);
        }
        for (key, value) in env_additions {
            spec = spec.with_env(key, value);
        }

        info!(
            program = %spec.program,
            script = %spec.script.display(),
            "launching entry process"
        );

        let code = self.launcher.run(&spec).await?;
        info!(code, "entry process exited");
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeLauncher {
        code: i32,
        seen: Mutex<Option<LaunchSpec>>,
    }

    #[async_trait::async_trait]
    impl ProcessLauncher for FakeLauncher {
        async fn run(&self, spec: &LaunchSpec) -> Result<i32, LaunchError> {
            *self.seen.lock().unwrap() = Some(spec.clone());
            Ok(self.code)
        }
    }

    #[tokio::test]
    async fn test_exit_code_passthrough() {
        let launcher = Arc::new(FakeLauncher {
            code: 7,
            seen: Mutex::new(None),
        });
        let use_case = LaunchUseCase::new(launcher.clone());

        let code = use_case
            .execute(
                &AppConfig::default(),
                vec![("LD_PRELOAD".to_string(), "/lib/x.so".to_string())],
            )
            .await
            .unwrap();

        assert_eq!(code, 7);
        let spec = launcher.seen.lock().unwrap().clone().unwrap();
        assert_eq!(spec.program, "python3");
        assert!(spec.env.iter().any(|(k, _)| k == "LD_PRELOAD"));
    }

    #[tokio::test]
    async fn test_overrides_precede_provision_env() {
        let launcher = Arc::new(FakeLauncher {
            code: 0,
            seen: Mutex::new(None),
        });
        let use_case = LaunchUseCase::new(launcher.clone());

        let mut config = AppConfig::default();
        config
            .env_overrides
            .push(("PREFIX".to_string(), "?".to_string()));

        use_case
            .execute(&config, vec![("LD_PRELOAD".to_string(), "x".to_string())])
            .await
            .unwrap();

        let spec = launcher.seen.lock().unwrap().clone().unwrap();
        assert_eq!(spec.env[0].0, "PREFIX");
        assert_eq!(spec.env[1].0, "LD_PRELOAD");
    }
}
