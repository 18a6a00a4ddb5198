use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const EXPERIMENT: &str = "\
prefix_size,ft0_exact,nt_estimate,mean_nt,lower_nt,upper_nt
1,1,1,1,0,2
2,2,2,2,1,3
3,3,3,3,2,4
";

fn hll_plots(root: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hll-plots"))
        .arg("--root")
        .arg(root)
        .output()
        .unwrap()
}

#[test]
fn empty_output_dir_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("output")).unwrap();

    let out = hll_plots(dir.path());
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("run the measurement stage first"), "{stderr}");
    assert!(out.stdout.is_empty());
    assert!(!dir.path().join("plots").exists());
}

#[test]
fn saved_charts_are_listed_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("wyhash_B4.csv"), EXPERIMENT).unwrap();

    let out = hll_plots(dir.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let png = dir.path().join("plots").join("wyhash_B4.png");
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["Saved files:", png.to_str().unwrap()]);
    assert!(png.exists());
}

#[test]
fn malformed_table_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("wyhash_B4.csv"), "prefix_size\n1\n").unwrap();

    let out = hll_plots(dir.path());
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("ft0_exact"), "{stderr}");
}
