//! Driver tests against scratch test directories

use std::fs::{self, OpenOptions};
use std::path::Path;

use stepwrap::cli::ExitCode;
use stepwrap::cli::StepError;
use stepwrap::cli::commands::{
    DiscoveryOptions, RunMode, add_steps, discover_test_files, error_line, found_line, process_file, run_batch,
};
use stepwrap::steps::StepConfig;
use tempfile::TempDir;

const USERS_TEST: &str = r#"package api;

public class UsersApiTest extends BaseTest {

    @Test
    public void testGetAllUsers() {
        assertTrue(true);
    }

    @Test
    public void testDeleteUser() {
        assertTrue(true);
    }
}
"#;

const HELPER_ONLY: &str = r#"package api;

public class HelperTest {
    private void setUp() {
        init();
    }
}
"#;

fn options_for(dir: &Path) -> DiscoveryOptions {
    DiscoveryOptions {
        root: dir.to_path_buf(),
        ..DiscoveryOptions::default()
    }
}

fn write(dir: &Path, name: &str, content: &[u8]) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_zero_files_found_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "UsersApi.java", USERS_TEST.as_bytes());

    let options = options_for(dir.path());
    let files = discover_test_files(&options).unwrap();
    assert!(files.is_empty());
    assert_eq!(found_line(files.len()), "Found 0 API test file(s)");

    let code = add_steps(&options, &StepConfig::default(), RunMode::Write).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(fs::read_to_string(dir.path().join("UsersApi.java")).unwrap(), USERS_TEST);
}

#[test]
fn test_missing_directory_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let options = options_for(&dir.path().join("api"));
    let code = add_steps(&options, &StepConfig::default(), RunMode::Write).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn test_discovery_is_sorted_and_not_recursive() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "PostsApiTest.java", USERS_TEST.as_bytes());
    write(dir.path(), "CommentsApiTest.java", USERS_TEST.as_bytes());
    write(dir.path(), "README.md", b"docs");
    fs::create_dir(dir.path().join("nested")).unwrap();
    write(&dir.path().join("nested"), "DeepTest.java", USERS_TEST.as_bytes());

    let files = discover_test_files(&options_for(dir.path())).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["CommentsApiTest.java", "PostsApiTest.java"]);
}

#[test]
fn test_write_mode_rewrites_in_place() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "UsersApiTest.java", USERS_TEST.as_bytes());

    let code = add_steps(&options_for(dir.path()), &StepConfig::default(), RunMode::Write).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let text = fs::read_to_string(dir.path().join("UsersApiTest.java")).unwrap();
    assert!(text.contains(
        "    public void testGetAllUsers() {\n        Step(\"Отправляем GET запрос для получения всех данных\", () -> {\n            assertTrue(true);\n        });\n    }"
    ));
    assert!(text.contains("Step(\"Отправляем DELETE запрос для удаления данных\", () -> {"));
    assert_eq!(text.matches("Step(").count(), 2);
}

#[test]
fn test_failing_file_does_not_stop_batch() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "AUsersApiTest.java", USERS_TEST.as_bytes());
    // Not valid UTF-8, so reading fails
    write(dir.path(), "BBrokenTest.java", &[0xff, 0xfe, 0x00, 0x80]);
    write(dir.path(), "CPostsApiTest.java", USERS_TEST.as_bytes());

    let files = discover_test_files(&options_for(dir.path())).unwrap();
    assert_eq!(files.len(), 3);

    let summary = run_batch(&files, &StepConfig::default(), RunMode::Write);
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.changed, 2);
    assert_eq!(summary.methods_wrapped, 4);

    let last = fs::read_to_string(dir.path().join("CPostsApiTest.java")).unwrap();
    assert!(last.contains("Step(\""));
    assert_eq!(fs::read(dir.path().join("BBrokenTest.java")).unwrap(), vec![0xff, 0xfe, 0x00, 0x80]);
}

#[test]
fn test_write_failure_does_not_stop_batch() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "AUsersApiTest.java", USERS_TEST.as_bytes());
    write(dir.path(), "BLockedTest.java", USERS_TEST.as_bytes());
    write(dir.path(), "CPostsApiTest.java", USERS_TEST.as_bytes());

    let locked = dir.path().join("BLockedTest.java");
    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&locked, perms.clone()).unwrap();

    // Permission bits do not stop root
    if OpenOptions::new().write(true).open(&locked).is_ok() {
        return;
    }

    let err = process_file(&locked, &StepConfig::default(), RunMode::Write).unwrap_err();
    assert!(matches!(err, StepError::Io { .. }));
    assert_eq!(err.path(), &locked);
    assert!(error_line(&err).starts_with(&format!("Error processing {}: ", locked.display())));

    let files = discover_test_files(&options_for(dir.path())).unwrap();
    let summary = run_batch(&files, &StepConfig::default(), RunMode::Write);
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.changed, 2);
    assert_eq!(summary.methods_wrapped, 4);

    assert_eq!(fs::read_to_string(&locked).unwrap(), USERS_TEST);
    let last = fs::read_to_string(dir.path().join("CPostsApiTest.java")).unwrap();
    assert!(last.contains("Step(\""));

    perms.set_readonly(false);
    fs::set_permissions(&locked, perms).unwrap();
}

#[test]
fn test_per_file_errors_keep_success_exit_code() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "BrokenTest.java", &[0xc3, 0x28]);

    let code = add_steps(&options_for(dir.path()), &StepConfig::default(), RunMode::Write).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn test_file_without_test_methods_is_untouched() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "HelperTest.java", HELPER_ONLY.as_bytes());

    let status = process_file(&dir.path().join("HelperTest.java"), &StepConfig::default(), RunMode::Write).unwrap();
    assert_eq!(status.methods_wrapped, 0);
    assert!(!status.changed);
    assert_eq!(fs::read_to_string(dir.path().join("HelperTest.java")).unwrap(), HELPER_ONLY);
}

#[test]
fn test_check_mode_writes_nothing_and_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "UsersApiTest.java", USERS_TEST.as_bytes());

    let err = add_steps(&options_for(dir.path()), &StepConfig::default(), RunMode::Check).unwrap_err();
    assert_eq!(err.exit_code, ExitCode::FAILURE);
    assert_eq!(fs::read_to_string(dir.path().join("UsersApiTest.java")).unwrap(), USERS_TEST);
}

#[test]
fn test_check_mode_passes_when_nothing_to_do() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "HelperTest.java", HELPER_ONLY.as_bytes());

    let code = add_steps(&options_for(dir.path()), &StepConfig::default(), RunMode::Check).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn test_diff_mode_returns_diff_without_writing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "UsersApiTest.java", USERS_TEST.as_bytes());

    let status = process_file(&dir.path().join("UsersApiTest.java"), &StepConfig::default(), RunMode::Diff).unwrap();
    assert!(status.changed);
    let diff = status.diff.unwrap();
    assert!(diff.contains("Step(\"Отправляем GET запрос для получения всех данных\""));
    assert_eq!(fs::read_to_string(dir.path().join("UsersApiTest.java")).unwrap(), USERS_TEST);
}

#[test]
fn test_custom_suffix() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "UsersApiIT.java", USERS_TEST.as_bytes());
    write(dir.path(), "UsersApiTest.java", USERS_TEST.as_bytes());

    let options = DiscoveryOptions {
        root: dir.path().to_path_buf(),
        suffix: "IT.java".to_string(),
    };
    let files = discover_test_files(&options).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("UsersApiIT.java"));
}
