use bundle_dts::bundle_declaration_file;
use bundle_dts::BundleOptions;
use bundle_dts::DtsBundler;
use bundle_dts::MemoryFs;
use bundle_dts::WarningCode;
use similar::TextDiff;
use std::path::Path;

const ENTRY: &str = "types/context-client.d.ts";

fn bundle(fs: &MemoryFs) -> Result<String, bundle_dts::BundleFileError> {
  let engine = DtsBundler::new(fs, BundleOptions::default());
  bundle_declaration_file(&engine, &fs, Path::new(ENTRY))
}

fn assert_text_eq(actual: &str, expected: &str) {
  if actual != expected {
    let diff = TextDiff::from_lines(expected, actual);
    panic!(
      "output mismatch:\n{}",
      diff.unified_diff().header("expected", "actual")
    );
  }
}

#[test]
fn inlines_relative_imports_and_strips_internal_plumbing() {
  let fs = MemoryFs::new();
  fs.insert(
    ENTRY,
    "import { Channel } from \"./support/chat\";\n\n/** Client context. */\nexport interface ContextClient {\n  channel: Channel;\n}\n",
  );
  fs.insert(
    "types/support/chat.d.ts",
    "export interface Channel {\n  id: string;\n}\n",
  );
  let code = bundle(&fs).unwrap();
  assert_text_eq(
    &code,
    "interface Channel {\n  id: string;\n}\n\n/** Client context. */\nexport interface ContextClient {\n  channel: Channel;\n}\n",
  );
  // The entry file on disk now holds the bundled text.
  assert_eq!(fs.get(Path::new(ENTRY)).unwrap(), code);
}

#[test]
fn hoists_external_imports_and_dedupes_by_specifier() {
  let fs = MemoryFs::new();
  fs.insert(
    ENTRY,
    "import { Observable } from \"rxjs\";\nimport { Channel } from \"./support/chat\";\n\nexport interface Stream {\n  events: Observable<Channel>;\n}\n",
  );
  fs.insert(
    "types/support/chat.d.ts",
    "import { Observable } from \"rxjs\";\n\nexport interface Channel {\n  stream: Observable<string>;\n}\n",
  );
  let code = bundle(&fs).unwrap();
  assert_text_eq(
    &code,
    "import { Observable } from \"rxjs\";\n\ninterface Channel {\n  stream: Observable<string>;\n}\n\nexport interface Stream {\n  events: Observable<Channel>;\n}\n",
  );
}

#[test]
fn renames_colliding_declarations_and_rewrites_references() {
  let fs = MemoryFs::new();
  fs.insert(
    ENTRY,
    "import { Message } from \"./a\";\nimport { Message as OtherMessage } from \"./b\";\n\nexport interface Envelope {\n  first: Message;\n  second: OtherMessage;\n}\n",
  );
  fs.insert("types/a.d.ts", "export interface Message {\n  text: string;\n}\n");
  fs.insert("types/b.d.ts", "export interface Message {\n  id: number;\n}\n");
  let code = bundle(&fs).unwrap();
  assert_text_eq(
    &code,
    "interface Message {\n  text: string;\n}\n\ninterface Message$1 {\n  id: number;\n}\n\nexport interface Envelope {\n  first: Message;\n  second: Message$1;\n}\n",
  );
}

#[test]
fn entry_reexports_become_bare_exports_of_final_names() {
  let fs = MemoryFs::new();
  fs.insert(
    ENTRY,
    "export { Channel } from \"./support/chat\";\n\nexport interface Client {\n  channel: Channel;\n}\n",
  );
  fs.insert(
    "types/support/chat.d.ts",
    "export interface Channel {\n  id: string;\n}\n",
  );
  let code = bundle(&fs).unwrap();
  assert_text_eq(
    &code,
    "interface Channel {\n  id: string;\n}\n\nexport { Channel };\n\nexport interface Client {\n  channel: Channel;\n}\n",
  );
}

#[test]
fn star_exported_module_declarations_stay_exported() {
  let fs = MemoryFs::new();
  fs.insert(ENTRY, "export * from \"./support/chat\";\n");
  fs.insert(
    "types/support/chat.d.ts",
    "export interface Channel {\n  id: string;\n}\n",
  );
  let code = bundle(&fs).unwrap();
  assert_text_eq(&code, "export interface Channel {\n  id: string;\n}\n");
}

#[test]
fn circular_imports_are_reported_and_fatal() {
  let fs = MemoryFs::new();
  fs.insert(ENTRY, "import { A } from \"./a\";\n\nexport declare const root: A;\n");
  fs.insert(
    "types/a.d.ts",
    "import { B } from \"./b\";\n\nexport interface A {\n  b: B;\n}\n",
  );
  fs.insert(
    "types/b.d.ts",
    "import { A } from \"./a\";\n\nexport interface B {\n  a: A;\n}\n",
  );
  let err = bundle(&fs).unwrap_err();
  let msg = err.to_string();
  assert!(msg.contains("circular import"), "unexpected error: {}", msg);
  // The entry is never overwritten on failure.
  assert!(fs.get(Path::new(ENTRY)).unwrap().starts_with("import { A }"));
}

#[test]
fn missing_export_is_reported_and_fatal() {
  let fs = MemoryFs::new();
  fs.insert(ENTRY, "import { Nope } from \"./a\";\n\nexport declare const x: Nope;\n");
  fs.insert("types/a.d.ts", "export interface Message {\n  text: string;\n}\n");
  let err = bundle(&fs).unwrap_err();
  assert_eq!(
    err.to_string(),
    "failed to bundle declarations for context-client.d.ts: \"./a\" does not export Nope"
  );
}

#[test]
fn unresolved_relative_import_is_fatal() {
  let fs = MemoryFs::new();
  fs.insert(ENTRY, "import { X } from \"./missing\";\n\nexport declare const x: X;\n");
  let err = bundle(&fs).unwrap_err();
  assert!(err.to_string().contains("could not resolve \"./missing\""));
}

#[test]
fn bare_imports_fail_when_externals_are_not_respected() {
  let fs = MemoryFs::new();
  fs.insert(ENTRY, "import { Observable } from \"rxjs\";\n\nexport declare const x: Observable<string>;\n");
  let engine = DtsBundler::new(
    &fs,
    BundleOptions {
      respect_external: false,
    },
  );
  let err = bundle_declaration_file(&engine, &fs, Path::new(ENTRY)).unwrap_err();
  assert!(err.to_string().contains("could not resolve \"rxjs\""));
}

#[test]
fn warnings_surface_through_the_engine_callback() {
  use bundle_dts::BundleHandle;
  use bundle_dts::Engine;
  let fs = MemoryFs::new();
  fs.insert(ENTRY, "export declare const x: string;\n");
  fs.insert("types/empty.d.ts", "");
  fs.insert(
    "types/loader.d.ts",
    "import {} from \"../types/empty\";\n\nexport declare const y: number;\n",
  );
  let engine = DtsBundler::new(&fs, BundleOptions::default());
  let mut codes = Vec::new();
  let handle = engine
    .bundle(Path::new("types/loader.d.ts"), &[], &mut |w| {
      codes.push(w.code)
    })
    .unwrap();
  assert_eq!(codes, vec![WarningCode::EmptyModule]);
  // The engine itself still produces output; escalation is the caller's job.
  let out = handle
    .generate(&bundle_dts::OutputOptions::default())
    .unwrap();
  assert_eq!(out.output.len(), 1);
}
