//! Integration tests for SpellMaker.
//!
//! These tests build a fake site-packages directory and run the full
//! requirements -> terms -> dictionary pipeline against it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use spellmaker::cli::{DictionaryFormatArg, OutputFormat};
use spellmaker::{
    Commands, Container, ContainerConfig, CreateDictionaryUseCase, DictionaryOptions,
    DomainError, FileDictionaryWriter, GenerateDictionaryUseCase, ProcessLibraryUseCase,
    Requirement, Router, SitePackagesLocator, TermKind, TreeSitterTermExtractor,
};
use tempfile::TempDir;

const REQUIREMENTS: &str = r#"
    # This is a comment
    numpy==1.19.2
    pandas==1.2.0
    # This is a comment
    black
    "#;

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let env = Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        };
        env.write("requirements.txt", REQUIREMENTS);
        env
    }

    fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn site_packages(&self) -> PathBuf {
        self.path("site-packages")
    }

    fn install_numpy(&self) {
        self.write("site-packages/numpy-1.19.2.dist-info/top_level.txt", "numpy\n");
        self.write(
            "site-packages/numpy/__init__.py",
            r#"
from .core import ndarray, dot
from . import linalg

pi = 3.141592653589793
"#,
        );
        self.write(
            "site-packages/numpy/core.py",
            r#"
class ndarray:
    def reshape(self, shape):
        pass

    def _buffer(self):
        pass

def dot(a, b):
    pass
"#,
        );
        self.write("site-packages/numpy/linalg/__init__.py", "def svd(a):\n    pass\n");
    }

    fn install_pandas(&self) {
        self.write("site-packages/pandas-1.2.0.dist-info/top_level.txt", "pandas\n");
        self.write(
            "site-packages/pandas/__init__.py",
            "from .core.frame import DataFrame\nfrom .io.parsers import read_csv\n",
        );
        self.write(
            "site-packages/pandas/core/frame.py",
            "class DataFrame:\n    def groupby(self, by):\n        pass\n",
        );
        self.write(
            "site-packages/pandas/io/parsers.py",
            "def read_csv(filepath_or_buffer):\n    pass\n",
        );
    }

    fn locator(&self) -> Arc<SitePackagesLocator> {
        Arc::new(SitePackagesLocator::new(vec![self.site_packages()]))
    }

    fn container(&self) -> Container {
        Container::new(ContainerConfig {
            site_packages: vec![self.site_packages()],
            isolated: true,
            max_depth: None,
        })
        .expect("Failed to build container")
    }

    fn generate(&self, output: &str, dedupe: bool, dry_run: bool) -> Commands {
        Commands::Generate {
            requirements: self.path("requirements.txt"),
            output: self.path(output),
            format: None,
            split: false,
            no_dedupe: !dedupe,
            min_length: 1,
            exclude: Vec::new(),
            dry_run,
        }
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read dictionary")
        .lines()
        .map(String::from)
        .collect()
}

#[tokio::test]
async fn test_process_library_finds_known_names() {
    let env = TestEnv::new();
    env.write(
        "site-packages/math.py",
        "pi = 3.141592653589793\n\ndef sqrt(x):\n    pass\n\ndef _private():\n    pass\n",
    );

    let use_case =
        ProcessLibraryUseCase::new(env.locator(), Arc::new(TreeSitterTermExtractor::new()));
    let terms = use_case
        .execute(&Requirement::new("math"))
        .await
        .expect("Failed to process library")
        .expect("math should be located");

    let texts: Vec<&str> = terms.iter().map(|t| t.text()).collect();
    assert_eq!(texts[0], "math", "library name comes first");
    assert_eq!(terms[0].kind(), TermKind::Library);
    assert!(texts.contains(&"sqrt"));
    assert!(texts.contains(&"pi"));
    assert!(!texts.contains(&"_private"));
}

#[tokio::test]
async fn test_process_library_collects_package_terms() {
    let env = TestEnv::new();
    env.install_numpy();

    let use_case =
        ProcessLibraryUseCase::new(env.locator(), Arc::new(TreeSitterTermExtractor::new()));
    let terms = use_case
        .execute(&Requirement::new("numpy"))
        .await
        .unwrap()
        .unwrap();

    let texts: Vec<&str> = terms.iter().map(|t| t.text()).collect();
    assert_eq!(
        texts,
        vec!["numpy", "core", "dot", "linalg", "ndarray", "pi", "reshape", "svd"]
    );

    let ndarray = terms.iter().find(|t| t.text() == "ndarray").unwrap();
    assert_eq!(ndarray.kind(), TermKind::Class);
}

#[tokio::test]
async fn test_process_library_skips_missing_package() {
    let env = TestEnv::new();
    fs::create_dir_all(env.site_packages()).unwrap();

    let use_case =
        ProcessLibraryUseCase::new(env.locator(), Arc::new(TreeSitterTermExtractor::new()));
    let terms = use_case.execute(&Requirement::new("black")).await.unwrap();
    assert!(terms.is_none());
}

#[tokio::test]
async fn test_generate_dictionary_includes_every_library() {
    let env = TestEnv::new();
    env.install_numpy();
    env.install_pandas();
    env.write("site-packages/black.py", "def format_str(src_contents, mode):\n    pass\n");

    let use_case =
        GenerateDictionaryUseCase::new(env.locator(), Arc::new(TreeSitterTermExtractor::new()));
    let generated = use_case
        .execute(&env.path("requirements.txt"), &DictionaryOptions::default())
        .await
        .expect("Failed to generate dictionary");

    let dictionary = &generated.dictionary;
    assert!(dictionary.contains("numpy"));
    assert!(dictionary.contains("pandas"));
    assert!(dictionary.contains("black"));
    assert!(dictionary.contains("DataFrame"));
    assert!(dictionary.contains("read_csv"));
    assert!(dictionary.contains("groupby"));
    assert!(generated.skipped().is_empty());
    assert_eq!(dictionary.words()[0], "numpy");
}

#[tokio::test]
async fn test_generate_dictionary_with_split_identifiers() {
    let env = TestEnv::new();
    env.install_pandas();

    let use_case =
        GenerateDictionaryUseCase::new(env.locator(), Arc::new(TreeSitterTermExtractor::new()));
    let options = DictionaryOptions::new()
        .with_split_identifiers(true)
        .with_exclude(["read"]);
    let generated = use_case
        .execute(&env.path("requirements.txt"), &options)
        .await
        .unwrap();

    let dictionary = &generated.dictionary;
    assert!(dictionary.contains("Data"));
    assert!(dictionary.contains("Frame"));
    assert!(dictionary.contains("csv"));
    assert!(!dictionary.contains("read"));
    assert!(!dictionary.contains("read_csv"));
    assert_eq!(generated.skipped(), vec!["numpy", "black"]);
}

#[tokio::test]
async fn test_create_dictionary_writes_output_and_reports_skips() {
    let env = TestEnv::new();
    env.install_numpy();

    let use_case = CreateDictionaryUseCase::new(
        env.locator(),
        Arc::new(TreeSitterTermExtractor::new()),
        Arc::new(FileDictionaryWriter::new()),
    );
    let output_path = env.path(".vscode/dictionaries/data-science-en.txt");

    let report = use_case
        .execute(
            &env.path("requirements.txt"),
            &output_path,
            &DictionaryOptions::default(),
            None,
        )
        .await
        .expect("Failed to create dictionary");

    assert_eq!(report.skipped(), vec!["pandas", "black"]);
    let lines = read_lines(&output_path);
    assert_eq!(lines.len(), report.word_count);
    assert_eq!(lines[0], "numpy");
    assert!(lines.contains(&"ndarray".to_string()));
}

#[tokio::test]
async fn test_create_dictionary_with_missing_requirements_writes_empty_file() {
    let env = TestEnv::new();
    fs::create_dir_all(env.site_packages()).unwrap();

    let use_case = CreateDictionaryUseCase::new(
        env.locator(),
        Arc::new(TreeSitterTermExtractor::new()),
        Arc::new(FileDictionaryWriter::new()),
    );
    let output_path = env.path("out/words.txt");

    let report = use_case
        .execute(
            &env.path("missing-requirements.txt"),
            &output_path,
            &DictionaryOptions::default(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(report.word_count, 0);
    assert!(read_lines(&output_path).is_empty());
}

#[tokio::test]
async fn test_router_generates_cspell_json() {
    let env = TestEnv::new();
    env.install_numpy();
    env.install_pandas();
    env.write("base-words.txt", "# already known\nnumpy\n");

    let container = Container::new(ContainerConfig {
        site_packages: vec![env.site_packages()],
        isolated: true,
        max_depth: None,
    })
    .expect("Failed to build container");
    let router = Router::new(&container);

    let output_path = env.path("cspell.json");
    let output = router
        .route(Commands::Generate {
            requirements: env.path("requirements.txt"),
            output: output_path.clone(),
            format: None,
            split: false,
            no_dedupe: false,
            min_length: 1,
            exclude: vec![env.path("base-words.txt")],
            dry_run: false,
        })
        .await
        .expect("Failed to route generate");

    assert!(output.contains("Wrote"), "unexpected output: {}", output);
    assert!(output.contains("Skipped (not installed): black"));

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    let words: Vec<&str> = document["words"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|w| w.as_str())
        .collect();
    assert!(words.contains(&"pandas"));
    assert!(words.contains(&"DataFrame"));
    assert!(!words.contains(&"numpy"));
}

#[tokio::test]
async fn test_router_inspect_unknown_library_fails() {
    let env = TestEnv::new();
    fs::create_dir_all(env.site_packages()).unwrap();

    let container = env.container();
    let router = Router::new(&container);

    let err = router
        .route(Commands::Inspect {
            library: "not-installed".to_string(),
            format: OutputFormat::Text,
        })
        .await
        .expect_err("an uninstalled library should fail");

    assert!(matches!(
        err.downcast_ref::<DomainError>(),
        Some(DomainError::NotFound(_))
    ));
    assert!(err.to_string().contains("not-installed"));
    assert!(err
        .to_string()
        .contains(&env.site_packages().display().to_string()));
}

#[tokio::test]
async fn test_router_dry_run_prints_without_writing() {
    let env = TestEnv::new();
    env.install_numpy();

    let container = env.container();
    let router = Router::new(&container);

    let output = router
        .route(env.generate("dictionaries/words.txt", true, true))
        .await
        .expect("Failed to route dry run");

    let words: Vec<&str> = output.lines().collect();
    assert_eq!(words[0], "numpy");
    assert!(words.contains(&"ndarray"));
    assert!(!env.path("dictionaries/words.txt").exists());
    assert!(!env.path("dictionaries").exists());
}

#[tokio::test]
async fn test_router_dry_run_honours_cspell_format() {
    let env = TestEnv::new();
    env.install_numpy();

    let container = env.container();
    let router = Router::new(&container);

    let mut command = env.generate("words.txt", true, true);
    if let Commands::Generate { format, .. } = &mut command {
        *format = Some(DictionaryFormatArg::Cspell);
    }
    let output = router.route(command).await.unwrap();

    let document: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(document["version"], "0.2");
    assert_eq!(document["words"][0], "numpy");
    assert!(!env.path("words.txt").exists());
}

#[tokio::test]
async fn test_router_no_dedupe_keeps_repeated_words() {
    let env = TestEnv::new();
    env.write("requirements.txt", "alpha
beta
");
    env.write("site-packages/alpha.py", "def shared():
    pass
");
    env.write("site-packages/beta.py", "def shared():
    pass
");

    let container = env.container();
    let router = Router::new(&container);

    router
        .route(env.generate("deduped.txt", true, false))
        .await
        .unwrap();
    router
        .route(env.generate("repeated.txt", false, false))
        .await
        .unwrap();

    assert_eq!(read_lines(&env.path("deduped.txt")), vec!["alpha", "shared", "beta"]);
    assert_eq!(
        read_lines(&env.path("repeated.txt")),
        vec!["alpha", "shared", "beta", "shared"]
    );
}

#[tokio::test]
async fn test_router_lists_libraries_as_text_and_json() {
    let env = TestEnv::new();
    fs::create_dir_all(env.site_packages()).unwrap();

    let container = env.container();
    let router = Router::new(&container);

    let text = router
        .route(Commands::Libraries {
            requirements: env.path("requirements.txt"),
            format: OutputFormat::Text,
        })
        .await
        .unwrap();
    assert_eq!(
        text,
        "Libraries (3):\n\n  numpy==1.19.2\n  pandas==1.2.0\n  black"
    );

    let json = router
        .route(Commands::Libraries {
            requirements: env.path("requirements.txt"),
            format: OutputFormat::Json,
        })
        .await
        .unwrap();
    let libraries: Vec<Requirement> = serde_json::from_str(&json).unwrap();
    let names: Vec<&str> = libraries.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["numpy", "pandas", "black"]);
    assert_eq!(libraries[0].specifier(), Some("==1.19.2"));

    let empty = router
        .route(Commands::Libraries {
            requirements: env.path("missing.txt"),
            format: OutputFormat::Text,
        })
        .await
        .unwrap();
    assert_eq!(empty, "No libraries found.");
}

#[tokio::test]
async fn test_router_inspect_reports_terms_with_kinds() {
    let env = TestEnv::new();
    env.install_numpy();

    let container = env.container();
    let router = Router::new(&container);

    let text = router
        .route(Commands::Inspect {
            library: "numpy".to_string(),
            format: OutputFormat::Text,
        })
        .await
        .unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], format!("{:<10} {}", "library", "numpy"));
    assert!(lines.contains(&format!("{:<10} {}", "class", "ndarray").as_str()));
    assert!(lines.contains(&format!("{:<10} {}", "method", "reshape").as_str()));
    assert!(text.ends_with("8 terms"));

    let json = router
        .route(Commands::Inspect {
            library: "numpy".to_string(),
            format: OutputFormat::Json,
        })
        .await
        .unwrap();
    let terms: serde_json::Value = serde_json::from_str(&json).unwrap();
    let terms = terms.as_array().unwrap();
    assert_eq!(terms.len(), 8);
    assert_eq!(terms[0]["text"], "numpy");
    assert_eq!(terms[0]["kind"], "library");
    assert!(terms
        .iter()
        .any(|t| t["text"] == "svd" && t["kind"] == "function"));
}

#[tokio::test]
async fn test_isolated_container_ignores_pythonpath() {
    let env = TestEnv::new();
    fs::create_dir_all(env.site_packages()).unwrap();
    env.write("pythonpath/spellmaker_only_here.py", "def marker():\n    pass\n");

    std::env::set_var("PYTHONPATH", env.path("pythonpath"));

    let isolated = env.container();
    let open = Container::new(ContainerConfig {
        site_packages: vec![env.site_packages()],
        isolated: false,
        max_depth: None,
    })
    .unwrap();

    std::env::remove_var("PYTHONPATH");

    assert_eq!(isolated.search_paths(), vec![env.site_packages()]);
    assert_eq!(open.search_paths()[0], env.site_packages());
    assert!(open.search_paths().contains(&env.path("pythonpath")));

    let inspect = || Commands::Inspect {
        library: "spellmaker_only_here".to_string(),
        format: OutputFormat::Text,
    };
    assert!(Router::new(&isolated).route(inspect()).await.is_err());
    let found = Router::new(&open).route(inspect()).await.unwrap();
    assert!(found.contains("marker"));
}
