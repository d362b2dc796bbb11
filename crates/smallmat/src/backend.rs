use std::fmt;

/// The kernel set that `f64` vectors and matrices were compiled with.
///
/// The choice is made at build time: the AVX kernels are used if the `simd` feature is enabled
/// (the default) and the target has the `avx` feature, for example via
/// `RUSTFLAGS="-C target-cpu=native"`. There is no runtime detection. Every other element type
/// always uses the portable kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Plain Rust, left to the auto-vectorizer.
    Portable,
    /// `core::arch::x86_64` AVX intrinsics.
    Avx,
}

impl Backend {
    /// Returns the backend this build uses.
    pub const fn active() -> Self {
        if cfg!(avx_kernels) {
            Self::Avx
        } else {
            Self::Portable
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Portable => "portable",
            Self::Avx => "AVX",
        }
    }

    /// Logs the active backend at *info* level.
    pub fn log() {
        let backend = Self::active();
        log::info!("using {} kernels for f64 vectors and matrices", backend);
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_build() {
        let expected = cfg!(all(
            feature = "simd",
            target_arch = "x86_64",
            target_feature = "avx"
        ));
        assert_eq!(Backend::active() == Backend::Avx, expected);
        assert_eq!(Backend::Portable.to_string(), "portable");
    }
}
