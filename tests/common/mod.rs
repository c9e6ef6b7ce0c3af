use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs carequeue commands in an isolated temp directory
pub struct CareQueueTest {
    pub temp_dir: TempDir,
}

#[allow(dead_code)]
impl CareQueueTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        CareQueueTest { temp_dir }
    }

    /// Start with `server.base_url` pointing at `base_url`
    pub fn with_server(base_url: &str) -> Self {
        let test = Self::new();
        test.write_config(&format!(
            "server:\n  base_url: {base_url}/openmrs\nauth:\n  username: admin\n  password: Admin123\n"
        ));
        test
    }

    pub fn run(&self, args: &[&str]) -> Output {
        // stdin is not inherited by `output()`, so commands never see a TTY
        Command::new(env!("CARGO_BIN_EXE_carequeue"))
            .args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("CAREQUEUE_HOME")
            .env_remove("CAREQUEUE_USERNAME")
            .env_remove("CAREQUEUE_PASSWORD")
            .env_remove("CAREQUEUE_LOG")
            .output()
            .expect("Failed to execute carequeue command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join(".carequeue").join("config.yaml")
    }

    pub fn write_config(&self, content: &str) {
        let path = self.config_path();
        fs::create_dir_all(path.parent().expect("config path has a parent"))
            .expect("Failed to create .carequeue directory");
        fs::write(path, content).expect("Failed to write config file");
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(self.config_path()).expect("Failed to read config file")
    }
}
