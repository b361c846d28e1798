#[cfg(feature = "bindings")]
mod error {
    use cbindgen::Error as BindgenError;
    use std::{env::VarError, error, fmt, io};

    #[derive(Debug)]
    pub enum Error {
        Bindgen(BindgenError),
        Io(io::Error),
        Env(VarError),
    }

    impl error::Error for Error {
        #[inline]
        fn source(&self) -> Option<&(dyn error::Error + 'static)> {
            match *self {
                Error::Bindgen(ref e) => Some(e),
                Error::Io(ref e) => Some(e),
                Error::Env(ref e) => Some(e),
            }
        }
    }

    impl fmt::Display for Error {
        #[inline]
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match *self {
                Error::Bindgen(ref e) => write!(f, "could not generate the C header: {}", e),
                Error::Io(ref e) => write!(f, "could not write the C header: {}", e),
                Error::Env(ref e) => write!(f, "could not locate the crate: {}", e),
            }
        }
    }

    impl From<io::Error> for Error {
        #[inline]
        fn from(e: io::Error) -> Self {
            Error::Io(e)
        }
    }

    impl From<BindgenError> for Error {
        #[inline]
        fn from(e: BindgenError) -> Self {
            Error::Bindgen(e)
        }
    }

    impl From<VarError> for Error {
        #[inline]
        fn from(e: VarError) -> Self {
            Error::Env(e)
        }
    }
}

#[cfg(feature = "bindings")]
fn main() -> Result<(), error::Error> {
    use cbindgen::{Builder, Language};
    use std::{
        env::{self, VarError},
        fs,
        path::PathBuf,
    };

    println!("cargo:rerun-if-changed=src/ffi.rs");

    let crate_dir = env::var("CARGO_MANIFEST_DIR")?;
    let bindings = Builder::new()
        .with_crate(crate_dir)
        .with_language(Language::C)
        .with_include_guard("ARCBALL_H")
        .with_sys_include("stdint.h")
        .generate()?;

    let mut header_path = target_dir()?;
    header_path.push("include/arcball");
    fs::create_dir_all(&header_path)?;
    header_path.push("arcball.h");

    bindings.write_to_file(header_path);

    #[inline]
    fn target_dir() -> Result<PathBuf, VarError> {
        env::var("CARGO_TARGET_DIR")
            .map(PathBuf::from)
            .or_else(|_| {
                env::var("CARGO_MANIFEST_DIR")
                    .map(PathBuf::from)
                    .map(|p| p.join("target"))
            })
    }

    Ok(())
}

#[cfg(not(feature = "bindings"))]
fn main() {}
