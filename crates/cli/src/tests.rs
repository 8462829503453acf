use super::*;

use std::ffi::OsStr;
use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};
use std::path::Path;
use std::process::ExitCode;

use metadata::{BasePermissions, FsProbe, MemoryStore, StaticResolver};
use predicates::prelude::*;

type TestServices = Services<MemoryStore, StaticResolver, FsProbe>;

fn services() -> TestServices {
    let resolver = StaticResolver::new()
        .with_user(0, "root")
        .with_user(1001, "alice")
        .with_user(1002, "bob")
        .with_group(20, "staff");
    Services::new(MemoryStore::new(), resolver, FsProbe)
}

fn get_with_args<'a>(
    services: &TestServices,
    args: impl IntoIterator<Item = &'a OsStr>,
) -> (i32, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run_get_with(args, services, &mut stdout, &mut stderr);
    (
        code,
        String::from_utf8(stdout).expect("utf-8 stdout"),
        String::from_utf8(stderr).expect("utf-8 stderr"),
    )
}

fn set_with_args<'a>(
    services: &TestServices,
    args: impl IntoIterator<Item = &'a OsStr>,
) -> (i32, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run_set_with(args, services, &mut stdout, &mut stderr);
    (
        code,
        String::from_utf8(stdout).expect("utf-8 stdout"),
        String::from_utf8(stderr).expect("utf-8 stderr"),
    )
}

fn os(text: &str) -> &OsStr {
    OsStr::new(text)
}

fn header(kind: &str, path: &Path) -> String {
    let base = BasePermissions::read(path, services().resolver()).expect("base permissions");
    format!("# {kind} permissions:\n{}", base.render())
}

fn write_file(path: &Path, mode: u32) {
    fs::write(path, b"data").expect("write file");
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("chmod");
}

#[test]
fn get_help_prints_usage() {
    let (code, stdout, stderr) = get_with_args(&services(), [os("getpanfsacl"), os("--help")]);
    assert_eq!(code, 0);
    assert_eq!(stdout, GET_HELP_TEXT);
    assert!(stderr.is_empty());
}

#[test]
fn set_help_prints_usage_even_with_other_options() {
    let (code, stdout, _) = set_with_args(&services(), [os("setpanfsacl"), os("-R"), os("-h")]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("setpanfsacl [-bindRvh] [{-m|-x} acl_spec] file ..."));
    assert!(predicate::str::contains("ACL ENTRIES").eval(&stdout));
}

#[test]
fn missing_file_argument_is_a_usage_error() {
    let (code, stdout, stderr) = get_with_args(&services(), [os("getpanfsacl"), os("-R")]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert_eq!(stderr, "Missing file argument (try --help)\n");

    let (code, _, stderr) = set_with_args(&services(), [os("setpanfsacl"), os("-m"), os("u:alice:r")]);
    assert_eq!(code, 1);
    assert_eq!(stderr, "Missing file argument (try --help)\n");
}

#[test]
fn unknown_option_is_a_usage_error() {
    let (code, _, stderr) = get_with_args(&services(), [os("getpanfsacl"), os("--bogus"), os("f")]);
    assert_eq!(code, 1);
    assert!(predicate::str::contains("--bogus").eval(&stderr));
}

#[test]
fn get_lists_decoded_entries_in_display_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dir = temp.path().join("shared");
    fs::create_dir(&dir).expect("mkdir");

    let services = services();
    services
        .store()
        .insert(&dir, "A0 +uid:1001,rnkRPx -gid:20,rn +uid:0,rnkRPwadNW");

    let (code, stdout, stderr) = get_with_args(&services, [os("getpanfsacl"), dir.as_os_str()]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stderr.is_empty());
    assert_eq!(
        stdout,
        format!(
            "{}# PanFS ACLs:\ndeny:group:staff:r (PARTIAL; missing kRPx)\nallow:user:alice:rx\n",
            header("directory", &dir)
        )
    );
}

#[test]
fn get_verbose_prints_raw_value_before_listing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("notes.txt");
    write_file(&file, 0o644);

    let services = services();
    services.store().insert(&file, "A0  +uid:1001,rn");

    let (code, stdout, _) = get_with_args(&services, [os("getpanfsacl"), os("-v"), file.as_os_str()]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("# file permissions:\n"));
    assert!(stdout.ends_with("A0 +uid:1001,rn\n# PanFS ACLs:\nallow:user:alice:r (PARTIAL; missing kRP)\n"));
}

#[test]
fn get_reports_missing_attribute_and_continues() {
    let temp = tempfile::tempdir().expect("tempdir");
    let bare = temp.path().join("bare");
    let tagged = temp.path().join("tagged");
    write_file(&bare, 0o644);
    write_file(&tagged, 0o644);

    let services = services();
    services.store().insert(&tagged, "A0 +gid:20,rnkRP");

    let (code, stdout, stderr) = get_with_args(
        &services,
        [os("getpanfsacl"), bare.as_os_str(), tagged.as_os_str()],
    );
    assert_eq!(code, 2);
    assert_eq!(stderr, format!("Failure getting ACL for {}\n", bare.display()));
    assert!(stdout.starts_with(&header("file", &bare)));
    assert!(stdout.ends_with("# PanFS ACLs:\nallow:group:staff:r\n"));
}

#[test]
fn get_reports_nonexistent_path() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("missing");

    let (code, stdout, stderr) = get_with_args(&services(), [os("getpanfsacl"), missing.as_os_str()]);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(predicate::str::contains("failed to inspect").eval(&stderr));
}

#[test]
fn get_aborts_when_identifier_cannot_be_resolved() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("f");
    write_file(&file, 0o644);

    let services = services();
    services.store().insert(&file, "A0 +uid:4242,rnkRP");

    let (code, _, stderr) = get_with_args(&services, [os("getpanfsacl"), file.as_os_str()]);
    assert_eq!(code, 1);
    assert_eq!(stderr, "Problem looking up string id for 4242\n");
}

#[test]
fn recursive_get_skips_symlinks_with_notice_when_verbose() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dir = temp.path().join("tree");
    fs::create_dir(&dir).expect("mkdir");
    let file = dir.join("a.txt");
    write_file(&file, 0o644);
    let link = dir.join("b-link");
    symlink(&file, &link).expect("symlink");

    let services = services();
    services.store().insert(&dir, "A0");
    services.store().insert(&file, "A0");

    let (code, stdout, stderr) = get_with_args(&services, [os("getpanfsacl"), os("-R"), dir.as_os_str()]);
    assert_eq!(code, 0);
    assert!(stderr.is_empty(), "quiet runs print no notices: {stderr}");
    assert_eq!(stdout.matches("# PanFS ACLs:").count(), 2);

    let (code, _, stderr) =
        get_with_args(&services, [os("getpanfsacl"), os("-Rv"), dir.as_os_str()]);
    assert_eq!(code, 0);
    assert_eq!(stderr, format!("Ignoring link at '{}'\n", link.display()));
}

#[test]
fn set_modify_appends_file_variant() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("data");
    write_file(&file, 0o644);

    let services = services();
    services.store().insert(&file, "A0 +gid:20,rnkRP");

    let (code, stdout, stderr) =
        set_with_args(&services, [os("setpanfsacl"), os("-m"), os("u:alice:r"), file.as_os_str()]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.is_empty());
    assert!(stderr.is_empty());
    assert_eq!(
        services.store().value(&file).as_deref(),
        Some("A0 +gid:20,rnkRP +uid:1001,rnkRP")
    );
    assert_eq!(services.store().write_count(), 1);
}

#[test]
fn set_modify_replaces_existing_entry_for_principal() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("data");
    write_file(&file, 0o644);

    let services = services();
    services.store().insert(&file, "A0 -uid:1001,rnkRP +gid:20,rnkRP");

    let (code, _, _) = set_with_args(
        &services,
        [os("setpanfsacl"), os("-m"), os("+user:alice:rw"), file.as_os_str()],
    );
    assert_eq!(code, 0);
    assert_eq!(
        services.store().value(&file).as_deref(),
        Some("A0 +gid:20,rnkRP +uid:1001,rnkRPwadNW")
    );
}

#[test]
fn set_verbose_reports_written_value() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("data");
    write_file(&file, 0o644);

    let services = services();
    services.store().insert(&file, "A0");

    let (code, _, stderr) = set_with_args(
        &services,
        [os("setpanfsacl"), os("-v"), os("-m"), os("-u:bob:w"), file.as_os_str()],
    );
    assert_eq!(code, 0);
    assert_eq!(stderr, format!("{}: A0 -uid:1002,wadNW\n", file.display()));
}

#[test]
fn entries_added_to_empty_attribute_can_be_listed_and_removed() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("data");
    write_file(&file, 0o644);

    let services = services();
    services.store().insert(&file, "");

    let (code, _, _) =
        set_with_args(&services, [os("setpanfsacl"), os("-m"), os("u:alice:r"), file.as_os_str()]);
    assert_eq!(code, 0);
    assert_eq!(services.store().value(&file).as_deref(), Some("+uid:1001,rnkRP"));

    let (code, stdout, _) = get_with_args(&services, [os("getpanfsacl"), file.as_os_str()]);
    assert_eq!(code, 0);
    assert!(stdout.ends_with("# PanFS ACLs:\nallow:user:alice:r\n"), "stdout: {stdout}");

    let (code, _, _) =
        set_with_args(&services, [os("setpanfsacl"), os("-m"), os("u:alice:r"), file.as_os_str()]);
    assert_eq!(code, 0);
    assert_eq!(services.store().value(&file).as_deref(), Some("+uid:1001,rnkRP"));

    let (code, _, _) =
        set_with_args(&services, [os("setpanfsacl"), os("-x"), os("u:alice"), file.as_os_str()]);
    assert_eq!(code, 0);
    assert_eq!(services.store().value(&file).as_deref(), Some(""));
}

#[test]
fn set_removing_absent_entry_writes_nothing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("data");
    write_file(&file, 0o644);

    let services = services();
    services.store().insert(&file, "A0 +uid:1001,rnkRP");

    let (code, _, stderr) =
        set_with_args(&services, [os("setpanfsacl"), os("-d"), os("-x"), os("bob"), file.as_os_str()]);
    assert_eq!(code, 0);
    assert_eq!(services.store().write_count(), 0);
    assert!(predicate::str::contains("no change required").eval(&stderr));
}

#[test]
fn set_remove_all_keeps_superuser_entries() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("data");
    write_file(&file, 0o644);

    let services = services();
    services
        .store()
        .insert(&file, "A0 +uid:0,rnkRP +uid:1001,rnkRP -gid:20,wadNW");

    let (code, _, _) = set_with_args(&services, [os("setpanfsacl"), os("-b"), file.as_os_str()]);
    assert_eq!(code, 0);
    assert_eq!(services.store().value(&file).as_deref(), Some("A0 +uid:0,rnkRP"));
}

#[test]
fn set_dry_run_reports_without_writing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("data");
    write_file(&file, 0o644);

    let services = services();
    services.store().insert(&file, "A0");

    let (code, _, stderr) = set_with_args(
        &services,
        [os("setpanfsacl"), os("-nv"), os("-m"), os("g:staff:r"), file.as_os_str()],
    );
    assert_eq!(code, 0);
    assert_eq!(services.store().write_count(), 0);
    assert_eq!(services.store().value(&file).as_deref(), Some("A0"));
    assert_eq!(
        stderr,
        format!("{}: A0 +gid:20,rnkRP (dry run)\n", file.display())
    );
}

#[test]
fn set_conditional_execute_depends_on_file_mode() {
    let temp = tempfile::tempdir().expect("tempdir");
    let script = temp.path().join("script");
    let plain = temp.path().join("plain");
    write_file(&script, 0o755);
    write_file(&plain, 0o644);

    let services = services();
    services.store().insert(&script, "A0");
    services.store().insert(&plain, "A0");

    let (code, _, _) = set_with_args(
        &services,
        [
            os("setpanfsacl"),
            os("-m"),
            os("u:alice:X"),
            script.as_os_str(),
            plain.as_os_str(),
        ],
    );
    assert_eq!(code, 0);
    assert_eq!(services.store().value(&script).as_deref(), Some("A0 +uid:1001,x"));
    assert_eq!(services.store().value(&plain).as_deref(), Some("A0"));
    assert_eq!(services.store().write_count(), 1);
}

#[test]
fn recursive_set_uses_directory_and_file_variants() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dir = temp.path().join("project");
    fs::create_dir(&dir).expect("mkdir");
    let file = dir.join("report");
    write_file(&file, 0o644);

    let services = services();
    services.store().insert(&dir, "A0");
    services.store().insert(&file, "A0");

    let (code, _, stderr) = set_with_args(
        &services,
        [os("setpanfsacl"), os("-R"), os("-i"), os("-m"), os("g:staff:rw"), dir.as_os_str()],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(
        services.store().value(&dir).as_deref(),
        Some("A0 +gid:20,rnkRPwadNWxcCD,I:OICI")
    );
    assert_eq!(
        services.store().value(&file).as_deref(),
        Some("A0 +gid:20,rnkRPwadNW")
    );
}

#[test]
fn set_refuses_superuser_targets() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("data");
    write_file(&file, 0o644);

    let services = services();
    services.store().insert(&file, "A0");

    let (code, _, stderr) =
        set_with_args(&services, [os("setpanfsacl"), os("-m"), os("u:root:r"), file.as_os_str()]);
    assert_eq!(code, 1);
    assert_eq!(stderr, "refusing to modify superuser user entry 'root'\n");
    assert_eq!(services.store().write_count(), 0);
}

#[test]
fn set_rejects_malformed_requests_before_touching_paths() {
    let (code, _, stderr) =
        set_with_args(&services(), [os("setpanfsacl"), os("-m"), os("user:alice"), os("f")]);
    assert_eq!(code, 1);
    assert_eq!(stderr, "user:alice is not a valid ACL, (try --help)\n");

    let (code, _, stderr) =
        set_with_args(&services(), [os("setpanfsacl"), os("-x"), os("o:alice"), os("f")]);
    assert_eq!(code, 1);
    assert_eq!(
        stderr,
        "o:alice: acl to be removed must be of the form [u[ser]:]uid or g[roup]:gid\n"
    );
}

#[test]
fn set_aborts_on_unknown_name() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("data");
    write_file(&file, 0o644);

    let services = services();
    services.store().insert(&file, "A0");

    let (code, _, stderr) =
        set_with_args(&services, [os("setpanfsacl"), os("-m"), os("g:nobody:r"), file.as_os_str()]);
    assert_eq!(code, 1);
    assert_eq!(stderr, "Problem looking up numeric id for nobody\n");
}

#[test]
fn set_write_failure_is_path_scoped() {
    let temp = tempfile::tempdir().expect("tempdir");
    let locked = temp.path().join("locked");
    let open = temp.path().join("open");
    write_file(&locked, 0o644);
    write_file(&open, 0o644);

    let services = services();
    services.store().insert(&locked, "A0");
    services.store().insert(&open, "A0");
    services.store().deny_writes(&locked);

    let (code, _, stderr) = set_with_args(
        &services,
        [
            os("setpanfsacl"),
            os("-m"),
            os("alice:r"),
            locked.as_os_str(),
            open.as_os_str(),
        ],
    );
    assert_eq!(code, 2);
    assert!(predicate::str::contains("failed to write PanFS ACL").eval(&stderr));
    assert_eq!(services.store().value(&open).as_deref(), Some("A0 +uid:1001,rnkRP"));
}

#[test]
fn exit_code_from_clamps_out_of_range_values() {
    assert_eq!(exit_code_from(0), ExitCode::SUCCESS);
    assert_eq!(exit_code_from(2), ExitCode::from(2));
    assert_eq!(exit_code_from(-1), ExitCode::from(0));
    assert_eq!(exit_code_from(300), ExitCode::from(u8::MAX));
}
