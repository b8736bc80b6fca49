use assert_cmd::Command;
use std::fs;
use std::path::Path;

fn write_declaration_tree(root: &Path) {
  fs::create_dir_all(root.join("types/support")).unwrap();
  fs::write(
    root.join("types/context-client.d.ts"),
    "import { Channel } from \"./support/chat\";\n\nexport interface ContextClient {\n  channel: Channel;\n}\n",
  )
  .unwrap();
  fs::write(
    root.join("types/support/chat.d.ts"),
    "export interface Channel {\n  id: string;\n}\n",
  )
  .unwrap();
}

#[test]
fn bundles_the_entry_file_in_place() {
  let tmp = tempfile::tempdir().unwrap();
  write_declaration_tree(tmp.path());
  Command::cargo_bin("bundle-dts-cli")
    .unwrap()
    .current_dir(tmp.path())
    .assert()
    .success()
    .stdout("");
  let bundled = fs::read_to_string(tmp.path().join("types/context-client.d.ts")).unwrap();
  assert_eq!(
    bundled,
    "interface Channel {\n  id: string;\n}\n\nexport interface ContextClient {\n  channel: Channel;\n}\n"
  );
  // The imported file itself is left alone.
  assert_eq!(
    fs::read_to_string(tmp.path().join("types/support/chat.d.ts")).unwrap(),
    "export interface Channel {\n  id: string;\n}\n"
  );
}

#[test]
fn missing_entry_file_exits_nonzero_and_names_it() {
  let tmp = tempfile::tempdir().unwrap();
  let output = Command::cargo_bin("bundle-dts-cli")
    .unwrap()
    .current_dir(tmp.path())
    .output()
    .unwrap();
  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.starts_with("error: "), "stderr: {}", stderr);
  assert!(stderr.contains("context-client.d.ts"), "stderr: {}", stderr);
}

#[test]
fn unresolved_import_leaves_the_entry_untouched() {
  let tmp = tempfile::tempdir().unwrap();
  fs::create_dir_all(tmp.path().join("types")).unwrap();
  let source = "import { Gone } from \"./missing\";\n\nexport declare const x: Gone;\n";
  fs::write(tmp.path().join("types/context-client.d.ts"), source).unwrap();
  let output = Command::cargo_bin("bundle-dts-cli")
    .unwrap()
    .current_dir(tmp.path())
    .output()
    .unwrap();
  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("could not resolve \"./missing\""), "stderr: {}", stderr);
  assert_eq!(
    fs::read_to_string(tmp.path().join("types/context-client.d.ts")).unwrap(),
    source
  );
}

#[test]
fn rejects_unexpected_arguments() {
  Command::cargo_bin("bundle-dts-cli")
    .unwrap()
    .arg("--frobnicate")
    .assert()
    .failure();
}
