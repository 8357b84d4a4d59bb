use smoke_core::{quote_token, Provisioner, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Version the stub reports for `--version` and `--update`.
pub const STUB_VERSION: &str = "v1.18.1";

/// Provisions a fake environment: an `activate` script that puts `bin/` first
/// on PATH, and a `python` stub that answers like the packaged client.
pub struct StubToolProvisioner;

impl Provisioner for StubToolProvisioner {
    fn provision(&self, dest: &Path) -> Result<()> {
        let bin = dest.join("bin");
        fs::create_dir_all(&bin)?;

        let root = dest.to_string_lossy();
        let activate = format!(
            "VIRTUAL_ENV={}\nexport VIRTUAL_ENV\nPATH=\"$VIRTUAL_ENV/bin:$PATH\"\nexport PATH\n",
            quote_token(&root)
        );
        fs::write(bin.join("activate"), activate)?;

        let python = bin.join("python");
        fs::write(&python, STUB_PYTHON.replace("@VERSION@", STUB_VERSION))?;
        fs::set_permissions(&python, fs::Permissions::from_mode(0o755))?;

        Ok(())
    }
}

// Only `python ok ...` is understood. Doctest outcomes are hard-wired: `f`
// passes, anything else reports zero passing cases.
const STUB_PYTHON: &str = r#"#!/bin/sh
if [ "$1" != "ok" ]; then
    echo "python: can't open file '$1'" >&2
    exit 2
fi
shift
if [ ! -f ok ]; then
    echo "python: can't open file 'ok': [Errno 2] No such file or directory" >&2
    exit 2
fi

case "$1" in
    --version)
        echo "okpy==@VERSION@"
        exit 0
        ;;
    --update)
        echo "Current version: @VERSION@"
        echo "Checking for software updates..."
        echo "OK is up to date"
        exit 0
        ;;
    --echo-args)
        shift
        for arg in "$@"; do
            printf '[%s]\n' "$arg"
        done
        exit 0
        ;;
    --list-files)
        ls -1
        exit 0
        ;;
    --crash)
        echo "Traceback (most recent call last):" >&2
        echo "RuntimeError: simulated crash" >&2
        exit 1
        ;;
esac

question=""
while [ $# -gt 0 ]; do
    case "$1" in
        -q)
            question="${2:-}"
            [ $# -gt 1 ] && shift
            ;;
    esac
    shift
done

if [ ! -f test.ok ]; then
    echo "ERROR  | No .ok configuration file found"
    exit 1
fi

passed=0
if [ "$question" = "f" ] && grep -q "^def f(" test.py 2>/dev/null; then
    passed=1
fi

echo "====================================================================="
echo "Assignment: Test Assignment"
echo "OK, version @VERSION@"
echo "====================================================================="
echo
echo "---------------------------------------------------------------------"
echo "Test summary"
echo "    $passed test cases passed! No cases failed."
"#;
