use assert_cmd::Command;

pub fn versioned_cmd() -> Command {
	let mut cmd = Command::cargo_bin("versioned").expect("versioned binary is built");
	cmd.env("NO_COLOR", "1").env_remove("VERSIONED_LOG");
	cmd
}
