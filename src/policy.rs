//! Policy bundles and the merger rule: the pure function that
//! derives an output [`DynFormat`] from two input formats, the requested
//! operation, and a caller-supplied set of overrides.

use crate::format::{cap_width, DynFormat, OvfMode, RndMode};

/// Which primitive operation a merge is being computed for; selects the
/// default `(int_bits, frac_bits)` recipe before any bundle
/// override is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// `i_out = i1+i2, f_out = f1+f2` under `FullPrec`, else
    /// `max(i1,i2), max(f1,f2)`.
    Mul,
    /// `i_out = max(i1,i2) + [FullPrec], f_out = max(f1,f2)`.
    Add,
    /// Same recipe as [`BinOp::Add`].
    Sub,
    /// Same recipe as [`BinOp::Add`].
    Div,
}

/// A named override set, applied on top of the merged format.
///
/// Any axis left as `None` (or `full_prec: false`) is derived by
/// [`merge_binary`]/[`merge_unary`]; any axis explicitly set here overrides
/// the corresponding merged axis. Builder methods are `const fn` so bundles
/// can be constructed and composed in `const` contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyBundle {
    int_bits: Option<u8>,
    frac_bits: Option<u8>,
    signed: Option<bool>,
    rnd: Option<RndMode>,
    ovf: Option<OvfMode>,
    full_prec: bool,
}

impl PolicyBundle {
    /// An empty bundle: every axis is derived by the merger rule.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            int_bits: None,
            frac_bits: None,
            signed: None,
            rnd: None,
            ovf: None,
            full_prec: false,
        }
    }

    /// Overrides the merged output's integer width.
    #[must_use]
    pub const fn int_bits(mut self, n: u8) -> Self {
        self.int_bits = Some(n);
        self
    }

    /// Overrides the merged output's fractional width.
    #[must_use]
    pub const fn frac_bits(mut self, n: u8) -> Self {
        self.frac_bits = Some(n);
        self
    }

    /// Overrides the merged output's signedness.
    #[must_use]
    pub const fn signed(mut self, s: bool) -> Self {
        self.signed = Some(s);
        self
    }

    /// Overrides the merged output's rounding mode.
    #[must_use]
    pub const fn rnd(mut self, r: RndMode) -> Self {
        self.rnd = Some(r);
        self
    }

    /// Overrides the merged output's overflow mode.
    #[must_use]
    pub const fn ovf(mut self, o: OvfMode) -> Self {
        self.ovf = Some(o);
        self
    }

    /// Requests full-precision widening: the output is sized to hold the
    /// exact result with no rounding or overflow (subject only to the
    /// 31-bit width cap).
    #[must_use]
    pub const fn full_prec(mut self) -> Self {
        self.full_prec = true;
        self
    }

    /// Whether [`PolicyBundle::full_prec`] was requested.
    #[must_use]
    pub const fn wants_full_prec(&self) -> bool {
        self.full_prec
    }
}

fn common_or_default<T: PartialEq + Copy>(a: T, b: T, default: T) -> T {
    if a == b {
        a
    } else {
        default
    }
}

/// Derives the output format for a two-operand primitive.
#[must_use]
pub fn merge_binary(f1: DynFormat, f2: DynFormat, bundle: &PolicyBundle, op: BinOp) -> DynFormat {
    let (mut i_out, mut f_out) = match op {
        BinOp::Mul if bundle.full_prec => (f1.int_bits + f2.int_bits, f1.frac_bits + f2.frac_bits),
        BinOp::Mul => (f1.int_bits.max(f2.int_bits), f1.frac_bits.max(f2.frac_bits)),
        BinOp::Add | BinOp::Sub | BinOp::Div => (
            f1.int_bits.max(f2.int_bits) + u8::from(bundle.full_prec),
            f1.frac_bits.max(f2.frac_bits),
        ),
    };
    let mut signed = f1.signed || f2.signed;
    let mut rnd = common_or_default(f1.rnd, f2.rnd, RndMode::Tcpl);
    let mut ovf = common_or_default(f1.ovf, f2.ovf, OvfMode::SatTcpl);

    if let Some(n) = bundle.int_bits {
        i_out = n;
    }
    if let Some(n) = bundle.frac_bits {
        f_out = n;
    }
    if let Some(s) = bundle.signed {
        signed = s;
    }
    if let Some(r) = bundle.rnd {
        rnd = r;
    }
    if let Some(o) = bundle.ovf {
        ovf = o;
    }

    let (ci, cf) = cap_width(i32::from(i_out), i32::from(f_out));
    DynFormat {
        int_bits: ci.max(0) as u8,
        frac_bits: cf.max(0) as u8,
        signed,
        rnd,
        ovf,
    }
}

/// Which unary primitive a merge is being computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// `i_out = i + 1`, result is always signed.
    Neg,
    /// `i_out = i + 1` for signed inputs; identity for unsigned inputs.
    Abs,
}

/// Derives the output format for a single-operand primitive.
#[must_use]
pub fn merge_unary(f: DynFormat, bundle: &PolicyBundle, op: UnOp) -> DynFormat {
    let (mut i_out, mut f_out, mut signed) = match op {
        UnOp::Neg => (f.int_bits + 1, f.frac_bits, true),
        UnOp::Abs if f.signed => (f.int_bits + 1, f.frac_bits, true),
        UnOp::Abs => (f.int_bits, f.frac_bits, false),
    };
    let mut rnd = f.rnd;
    let mut ovf = f.ovf;

    if let Some(n) = bundle.int_bits {
        i_out = n;
    }
    if let Some(n) = bundle.frac_bits {
        f_out = n;
    }
    if let Some(s) = bundle.signed {
        signed = s;
    }
    if let Some(r) = bundle.rnd {
        rnd = r;
    }
    if let Some(o) = bundle.ovf {
        ovf = o;
    }

    let (ci, cf) = cap_width(i32::from(i_out), i32::from(f_out));
    DynFormat {
        int_bits: ci.max(0) as u8,
        frac_bits: cf.max(0) as u8,
        signed,
        rnd,
        ovf,
    }
}

/// Named policy bundle for [`crate::linalg::gemul::qgemul`]: one bundle for
/// the partial-product multiply, one for the adder-tree reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct GemulArgs {
    /// Policy applied to each `a[r][k] * b[k][c]` partial product.
    pub mul: PolicyBundle,
    /// Policy applied to the adder-tree reduction of the partial products.
    pub add: PolicyBundle,
}

/// Named policy bundle for [`crate::linalg::gemv::qgemv`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GemvArgs {
    /// Policy applied to every multiply: `a[r][k]*x[k]`, `alpha*dot`, and
    /// `beta*y[r]`.
    pub mul: PolicyBundle,
    /// Policy applied to the dot-product reduction and the final add.
    pub add: PolicyBundle,
}

/// Named policy bundle for [`crate::linalg::gramul::qgramul_ata`] and
/// [`qgramul_aat`](crate::linalg::gramul::qgramul_aat).
///
/// Diagonal and off-diagonal entries each get their own multiply *and* add
/// bundle. Diagonal entries are sums of squares — the case that most often
/// needs extra headroom on the multiply itself, not just on the
/// accumulation — so pinning only the reduction bundle would leave the
/// multiply unable to diverge from the off-diagonal path.
#[derive(Debug, Clone, Copy, Default)]
pub struct GramulArgs {
    /// Multiply policy for diagonal entries.
    pub diag_mul: PolicyBundle,
    /// Reduction policy for diagonal entries.
    pub diag_add: PolicyBundle,
    /// Multiply policy for off-diagonal entries.
    pub off_mul: PolicyBundle,
    /// Reduction policy for off-diagonal entries.
    pub off_add: PolicyBundle,
}

/// Named policy bundle for [`crate::linalg::potrf::qpotrf`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PotrfArgs {
    /// Policy applied to each product term in a row's running dot product.
    pub mul: PolicyBundle,
    /// Policy applied to the dot-product reduction and the pivot subtract.
    pub add: PolicyBundle,
}

/// Named policy bundle for [`crate::linalg::potrs::qpotrs`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PotrsArgs {
    /// Policy applied to every multiply in forward/back substitution.
    pub mul: PolicyBundle,
    /// Policy applied to the dot-product reduction and the subtract step.
    pub add: PolicyBundle,
}

/// Named policy bundle for [`crate::linalg::sytrf::qsytrf`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SytrfArgs {
    /// Policy applied to every multiply, including the pivot divide.
    pub mul: PolicyBundle,
    /// Policy applied to the correction-term reduction and subtract.
    pub add: PolicyBundle,
}

/// Named policy bundle for [`crate::linalg::trtri::qtrtri_lower`] and
/// [`qtrtri_upper`](crate::linalg::trtri::qtrtri_upper).
#[derive(Debug, Clone, Copy, Default)]
pub struct TrtriArgs {
    /// Policy applied to every multiply and the diagonal divide.
    pub mul: PolicyBundle,
    /// Policy applied to the cross-term reduction and negation.
    pub add: PolicyBundle,
}
