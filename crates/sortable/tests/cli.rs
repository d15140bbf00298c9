use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;

fn sortable_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sortable"))
}

fn sortable(dir: &Path) -> Command {
    let mut cmd = Command::new(sortable_binary());
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}

fn run(dir: &Path, args: &[&str]) -> Output {
    sortable(dir).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "Expected exit 0, got {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

#[test]
fn render_file_replaces_sortable_tags() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("table.html"),
        "<tr>{% sortable_header name %}{% sortable_header -price Price '/img/arrow.png' %}</tr>\n",
    )
    .unwrap();

    let output = run(
        dir.path(),
        &["render", "table.html", "--url", "/items/?sort=price&dir=asc&page=2"],
    );

    assert_success(&output);
    assert_eq!(
        stdout(&output),
        concat!(
            r#"<tr><th class="sort-none"><a href="/items/?sort=name&amp;page=2&amp;dir=asc" title="Name">Name</a></th>"#,
            r#"<th class="sort-asc"><a href="/items/?sort=price&amp;page=2&amp;dir=desc" title="Price">Price</a>"#,
            r#"<span class="pull-right"><img class="sort-img sort-asc-img" src="/img/arrow.png" style="transform: rotate(180deg);"></span></th></tr>"#,
            "\n"
        )
    );
}

#[test]
fn render_reads_stdin_and_uses_project_classes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("sortable.toml"),
        "[classes]\nascending = \"up\"\ndescending = \"down\"\nunsorted = \"flat\"\n",
    )
    .unwrap();

    let mut child = sortable(dir.path())
        .args(["render", "--url", "/?sort=name&dir=desc"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"{% sortable_class name %} {% sortable_class price %}")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_success(&output);
    assert_eq!(stdout(&output), "down flat");
}

#[test]
fn render_resolves_context_variables() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("list.html"),
        "{% sortable_link price labels.price %}|{% sortable_link name heading %}",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("context.json"),
        r#"{"labels": {"price": "Unit price"}, "heading": "from file"}"#,
    )
    .unwrap();

    let output = run(
        dir.path(),
        &[
            "render",
            "list.html",
            "--context",
            "context.json",
            "--var",
            "heading=Product",
        ],
    );

    assert_success(&output);
    assert_eq!(
        stdout(&output),
        concat!(
            r#"<a href="/?sort=price&amp;dir=asc" class="sort-none" title="Unit price">Unit price</a>|"#,
            r#"<a href="/?sort=name&amp;dir=asc" class="sort-none" title="Product">Product</a>"#
        )
    );
}

#[test]
fn render_malformed_tag_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("broken.html"),
        "<table>\n<tr>{% sortable_header %}</tr>\n",
    )
    .unwrap();

    let output = run(dir.path(), &["render", "broken.html"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.html:2:5"), "stderr: {stderr}");
    assert!(
        stderr.contains("'sortable_header' tag takes at least 1 argument"),
        "stderr: {stderr}"
    );
}

#[test]
fn link_renders_single_tag() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(
        dir.path(),
        &["link", "--url", "/items/?sort=name&dir=asc&page=2", "--", "-price"],
    );

    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "<a href=\"/items/?sort=price&amp;page=2&amp;dir=desc\" class=\"sort-none\" title=\"Price\">Price</a>\n"
    );
}

#[test]
fn link_flags_after_declaration() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["link", "name", "--url", "/?sort=name&dir=asc"]);

    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "<a href=\"/?sort=name&amp;dir=desc\" class=\"sort-asc\" title=\"Name\">Name</a>\n"
    );
}

#[test]
fn link_url_kind() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(
        dir.path(),
        &["link", "--kind", "url", "--url", "/items/?sort=name&dir=asc", "name"],
    );

    assert_success(&output);
    assert_eq!(stdout(&output), "/items/?sort=name&amp;dir=desc\n");
}

#[test]
fn link_json_reports_state() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(
        dir.path(),
        &["link", "--json", "--url", "/?sort=name&dir=desc", "name"],
    );

    assert_success(&output);
    let state: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state["url"], "/?sort=name&amp;dir=asc");
    assert_eq!(state["css_class"], "sort-desc");
    assert_eq!(state["is_current"], true);
    assert_eq!(state["active_direction"], "desc");
    assert_eq!(state["next_direction"], "asc");
}

#[test]
fn user_config_is_read_from_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let user_dir = dir.path().join(".config").join("sortable");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(user_dir.join("sortable.toml"), "[classes]\nunsorted = \"user\"\n").unwrap();
    let project = dir.path().join("project");
    std::fs::create_dir(&project).unwrap();

    let output = sortable(dir.path())
        .args(["link", "--kind", "class", "--project"])
        .arg(&project)
        .arg("name")
        .output()
        .unwrap();

    assert_success(&output);
    if cfg!(target_os = "linux") {
        assert_eq!(stdout(&output), "user\n");
    }
}

#[test]
fn invalid_settings_exit_one() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("sortable.toml"),
        "[classes]\nascending = not_a_string",
    )
    .unwrap();

    let output = run(dir.path(), &["link", "name"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load settings"));
}
