use std::fs;
use std::path::Path;

use minish::config::Config;
use minish::environment::Environment;
use minish::{Shell, ShellError};
use tempfile::TempDir;

/// A working directory with a few files and one sub-directory:
///
/// ```text
/// a.txt      "a"
/// b.txt      "b\n"
/// file.txt   "apple\nbanana\norange\n"
/// D/x.txt    "x\n"
/// ```
fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::write(dir.path().join("b.txt"), "b\n").unwrap();
    fs::write(dir.path().join("file.txt"), "apple\nbanana\norange\n").unwrap();
    fs::create_dir(dir.path().join("D")).unwrap();
    fs::write(dir.path().join("D/x.txt"), "x\n").unwrap();
    dir
}

fn shell_in(dir: &Path) -> Shell {
    Shell::with_env(&Config::default_config(), Environment::new(dir))
}

fn output_with_input(dir: &Path, line: &str, input: &str) -> Result<String, ShellError> {
    let mut out = Vec::new();
    shell_in(dir).eval(line, &mut input.as_bytes(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn output_for(dir: &Path, line: &str) -> String {
    output_with_input(dir, line, "").unwrap_or_else(|e| panic!("{line:?} failed: {e}"))
}

fn error_for(dir: &Path, line: &str) -> ShellError {
    match output_with_input(dir, line, "") {
        Ok(out) => panic!("{line:?} succeeded with {out:?}"),
        Err(e) => e,
    }
}

macro_rules! output_test {
    ($name:ident, $cmd:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let dir = fixture();
            assert_eq!(output_for(dir.path(), $cmd), $expected, "command: {}", $cmd);
        }
    };
}

// ── Scenarios ──

output_test!(trailing_semicolon, "echo hello;", "hello\n");
output_test!(empty_grep_pattern_matches_all, "grep '' file.txt", "apple\nbanana\norange\n");
output_test!(cut_range_clamps, "cut -b 1-2 a.txt", "a\n");

#[test]
fn cat_reads_stdin_at_dash() {
    let dir = fixture();
    let out = output_with_input(dir.path(), "cat a.txt - b.txt", "hello world\nhello mars").unwrap();
    assert_eq!(out, "ahello world\nhello mars\nb\n");
}

#[test]
fn glob_before_slash_lists_directories_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("D")).unwrap();
    fs::write(dir.path().join("f.txt"), "").unwrap();
    assert_eq!(output_for(dir.path(), "ls */"), "D:\n");
}

// ── Quoting ──

output_test!(single_quotes_are_literal, "echo 'a * `b` \"c\"'", "a * `b` \"c\"\n");
output_test!(double_quotes_keep_spaces, "echo \"a   b\"", "a   b\n");
output_test!(quotes_join_adjacent_text, "echo x'y'\"z\"", "xyz\n");
output_test!(operators_inside_quotes, "echo 'a;b|c' \"<d>\"", "a;b|c <d>\n");
output_test!(empty_quotes_are_an_argument, "echo '' | wc -c", "1\n");

// ── Command substitution ──

output_test!(substitution_unquoted_splits, "echo `echo a   b`", "a b\n");
output_test!(substitution_in_double_quotes, "echo \"x `echo y  z` w\"", "x y  z w\n");
output_test!(substitution_as_command_name, "`echo echo` hi", "hi\n");
output_test!(substitution_output_not_globbed, "echo `echo '*.txt'`", "*.txt\n");
output_test!(substitution_with_pipe, "echo `cat file.txt | grep ban`", "banana\n");
output_test!(substitution_sees_earlier_commands, "echo data > f; echo `cat f`", "data\n");

#[test]
fn substitution_failure_is_resolution_error() {
    let dir = fixture();
    let err = error_for(dir.path(), "echo `cat missing.txt`");
    assert!(matches!(err, ShellError::Resolution(_)), "{err:?}");
    assert!(err.to_string().contains("missing.txt: No such file or directory"));
}

#[test]
fn substitution_depth_limit() {
    let dir = fixture();
    let mut config = Config::default_config();
    config.settings.max_substitution_depth = 0;
    let mut shell = Shell::with_env(&config, Environment::new(dir.path()));
    let err = shell.eval_to_string("echo `echo a`").unwrap_err();
    assert!(matches!(err, ShellError::SubstitutionDepth(0)));
}

// ── Globbing ──

output_test!(glob_sorted, "echo *.txt", "a.txt b.txt file.txt\n");
output_test!(glob_prefix_and_suffix, "echo f*e.txt", "file.txt\n");
output_test!(glob_in_subdirectory, "echo D/*", "D/x.txt\n");
output_test!(glob_without_match_is_literal, "echo *.none", "*.none\n");
output_test!(quoted_glob_is_literal, "echo '*.txt' \"*\"", "*.txt *\n");

#[test]
fn glob_skips_hidden_entries() {
    let dir = fixture();
    fs::write(dir.path().join(".hidden.txt"), "").unwrap();
    assert_eq!(output_for(dir.path(), "echo *.txt"), "a.txt b.txt file.txt\n");
}

// ── Pipes ──

output_test!(pipe_two_stages, "cat file.txt | grep an", "banana\norange\n");
output_test!(pipe_three_stages, "cat file.txt | grep an | sort -r", "orange\nbanana\n");
output_test!(pipe_into_wc, "cat file.txt | wc -l", "3\n");
output_test!(pipe_head_tail, "cat file.txt | head -n 2 | tail -n 1", "banana\n");
output_test!(pipe_sort_uniq, "cat file.txt file.txt | sort | uniq", "apple\nbanana\norange\n");
output_test!(pipe_tee, "echo hi | tee copy.txt; cat copy.txt", "hi\nhi\n");

#[test]
fn pipe_failure_forwards_nothing() {
    let dir = fixture();
    let err = error_for(dir.path(), "cat missing.txt | wc -l");
    assert_eq!(err.to_string(), "cat: missing.txt: No such file or directory");
}

#[test]
fn pipe_drops_partial_output_of_failed_stage() {
    let dir = fixture();
    let err = error_for(dir.path(), "cat a.txt missing.txt | tee seen.txt | wc -c");
    assert_eq!(err.to_string(), "cat: missing.txt: No such file or directory");
    assert!(!dir.path().join("seen.txt").exists(), "later stages must not run");
}

output_test!(
    pipe_failure_in_sequence_reports_only_error,
    "cat a.txt missing.txt | wc -c; echo x",
    "shell: cat: missing.txt: No such file or directory\nx\n"
);

// ── Redirection ──

output_test!(redirect_round_trip, "echo hi > out.txt; cat < out.txt", "hi\n");
output_test!(redirect_without_spaces, "echo hi>out.txt;cat<out.txt", "hi\n");
output_test!(redirect_before_command, "< file.txt grep or", "orange\n");
output_test!(redirect_input_into_paste, "paste - - < file.txt", "apple\tbanana\norange\t\n");
output_test!(redirect_input_from_directory_is_empty, "wc -l < D", "0\n");
output_test!(last_output_redirection_wins, "echo x > one > two; cat one two", "x\n");
output_test!(last_input_redirection_wins, "cat < a.txt < b.txt", "b\n");

#[test]
fn redirect_preserves_bytes() {
    let dir = fixture();
    let content = "line one\n\ttabbed\nno newline at end";
    fs::write(dir.path().join("src.txt"), content).unwrap();
    output_for(dir.path(), "cat src.txt > copy.txt");
    assert_eq!(fs::read_to_string(dir.path().join("copy.txt")).unwrap(), content);
}

#[test]
fn redirect_round_trip_keeps_raw_bytes() {
    let dir = fixture();
    let content: &[u8] = b"caf\xe9\r\nline2\n";
    fs::write(dir.path().join("src.bin"), content).unwrap();
    output_for(dir.path(), "cat < src.bin > copy.bin; cat src.bin | cat > piped.bin");
    assert_eq!(fs::read(dir.path().join("copy.bin")).unwrap(), content);
    assert_eq!(fs::read(dir.path().join("piped.bin")).unwrap(), content);
}

#[test]
fn redirect_errors() {
    let dir = fixture();
    assert!(matches!(error_for(dir.path(), "cat <"), ShellError::Redirection(_)));
    assert!(matches!(error_for(dir.path(), "cat < missing"), ShellError::Redirection(_)));
    assert!(matches!(error_for(dir.path(), "echo x > *.txt"), ShellError::Redirection(_)));
    assert!(matches!(error_for(dir.path(), "echo x > D"), ShellError::Redirection(_)));
    assert_eq!(error_for(dir.path(), "echo x > ''").to_string(), ": No such file or directory");
}

// ── Sequences and failures ──

output_test!(
    sequence_reports_and_continues,
    "cat missing.txt; echo after",
    "shell: cat: missing.txt: No such file or directory\nafter\n"
);
output_test!(
    sequence_unknown_command,
    "frobnicate; echo x",
    "shell: frobnicate: invalid command\nx\n"
);
output_test!(sequence_skips_empty_elements, "echo a;; echo b;", "a\nb\n");

#[test]
fn single_command_errors_propagate() {
    let dir = fixture();
    assert_eq!(error_for(dir.path(), "frobnicate").to_string(), "frobnicate: invalid command");
}

#[test]
fn syntax_errors() {
    let dir = fixture();
    assert!(matches!(error_for(dir.path(), "echo a | | b"), ShellError::Syntax(_)));
    assert!(matches!(error_for(dir.path(), "| echo"), ShellError::Syntax(_)));
    assert!(matches!(error_for(dir.path(), "echo 'open"), ShellError::Syntax(_)));
    assert!(matches!(error_for(dir.path(), "echo `open"), ShellError::Syntax(_)));
}

#[test]
fn exit_stops_the_sequence() {
    let dir = fixture();
    let mut out = Vec::new();
    let result = shell_in(dir.path()).eval("echo a; exit; echo b", &mut std::io::empty(), &mut out);
    assert!(matches!(result, Err(ShellError::Exit(0))));
    assert_eq!(out, b"a\n");
}

// ── Unsafe variants ──

output_test!(unsafe_variant_reports_inline, "_cat missing.txt | wc -l", "1\n");
output_test!(
    unsafe_variant_output_is_data,
    "_rm D",
    "rm: D: Is a directory\n"
);

// ── Filesystem applications ──

output_test!(ls_directory_argument, "ls D", "D:\nx.txt\n");
output_test!(ls_working_directory, "ls", "D\ta.txt\tb.txt\tfile.txt\n");
output_test!(mkdir_then_ls, "mkdir -p new/inner; ls new", "new:\ninner\n");
output_test!(mv_into_directory, "mv a.txt b.txt D; ls D", "D:\na.txt\tb.txt\tx.txt\n");
output_test!(rm_then_glob, "rm a.txt b.txt; echo *.txt", "file.txt\n");
output_test!(find_by_name, "find -name '*.txt'", "./D/x.txt\n./a.txt\n./b.txt\n./file.txt\n");

#[test]
fn cd_changes_later_commands() {
    let dir = fixture();
    let root = dir.path().canonicalize().unwrap();
    let mut shell = shell_in(dir.path());
    let out = shell.eval_to_string("cd D; pwd; cat x.txt").unwrap();
    assert_eq!(out, format!("{}\nx\n", root.join("D").display()));
    assert_eq!(shell.env().cwd(), root.join("D"));
}

#[test]
fn cd_persists_across_lines() {
    let dir = fixture();
    let mut shell = shell_in(dir.path());
    shell.eval_to_string("cd D").unwrap();
    assert_eq!(shell.eval_to_string("ls").unwrap(), "x.txt\n");
}

#[test]
fn shells_do_not_share_directories() {
    let first = fixture();
    let second = fixture();
    let mut a = shell_in(first.path());
    let b = shell_in(second.path());
    a.eval_to_string("cd D").unwrap();
    assert_eq!(b.env().cwd(), second.path());
}

#[test]
fn disabled_application_is_unknown() {
    let dir = fixture();
    let mut config = Config::default_config();
    config.applications.enabled.retain(|name| name != "rm");
    let mut shell = Shell::with_env(&config, Environment::new(dir.path()));
    let err = shell.eval_to_string("rm a.txt").unwrap_err();
    assert!(matches!(err, ShellError::UnknownApplication(_)));
    assert!(dir.path().join("a.txt").exists());
}

#[test]
fn run_line_entry_point() {
    let dir = fixture();
    assert_eq!(minish::run_line("echo `echo a` b", dir.path()).unwrap(), "a b\n");
}
