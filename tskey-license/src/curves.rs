//! Curve configuration for the two key classes.
//!
//! Each class signs over its own short Weierstrass curve. The parameter
//! sets below — private scalar included — are fixed protocol constants
//! reproduced verbatim; this scheme ships its signing secret rather than
//! deriving or protecting one.

use crate::error::{LicenseError, LicenseResult};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tskey_crypto::{Curve, Point};

/// The two key classes, each bound to its own curve instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyClass {
    /// Key bound to an identifier-derived numeric ID.
    Server,
    /// Key bound to packed channel/quantity/version metadata.
    Pack,
}

/// Raw decimal parameter set for one class.
struct CurveConstants {
    a: &'static str,
    b: &'static str,
    p: &'static str,
    n: &'static str,
    gx: &'static str,
    gy: &'static str,
    kx: &'static str,
    ky: &'static str,
    private_scalar: &'static str,
}

const SERVER_CURVE: CurveConstants = CurveConstants {
    a: "1",
    b: "0",
    p: "21782971228112002125810473336838725345308036616026120243639513697227789232461459408261967852943809534324870610618161",
    n: "629063109922370885449",
    gx: "10692194187797070010417373067833672857716423048889432566885309624149667762706899929433420143814127803064297378514651",
    gy: "14587399915883137990539191966406864676102477026583239850923355829082059124877792299572208431243410905713755917185109",
    kx: "3917395608307488535457389605368226854270150445881753750395461980792533894109091921400661704941484971683063487980768",
    ky: "8858262671783403684463979458475735219807686373661776500155868309933327116988404547349319879900761946444470688332645",
    private_scalar: "153862071918555979944",
};

const PACK_CURVE: CurveConstants = CurveConstants {
    a: "1",
    b: "0",
    p: "28688293616765795404141427476803815352899912533728694325464374376776313457785622361119232589082131818578591461837297",
    n: "675048016158598417213",
    gx: "18999816458520350299014628291870504329073391058325678653840191278128672378485029664052827205905352913351648904170809",
    gy: "7233699725243644729688547165924232430035643592445942846958231777803539836627943189850381859836033366776176689124317",
    kx: "7147768390112741602848314103078506234267895391544114241891627778383312460777957307647946308927283757886117119137500",
    ky: "20525272195909974311677173484301099561025532568381820845650748498800315498040161314197178524020516408371544778243934",
    private_scalar: "100266970209474387075",
};

/// A validated curve instance: domain, generator, public point and the
/// signing scalar. Immutable after load.
#[derive(Clone, Debug)]
pub struct CurveConfig {
    curve: Curve,
    generator: Point,
    public: Point,
    private_scalar: BigUint,
}

impl CurveConfig {
    /// Loads and validates the configuration for a key class.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::CurveInitialization`] if the generator or the
    /// public point fails the on-curve check; the class is then unusable.
    pub fn load(class: KeyClass) -> LicenseResult<Self> {
        let constants = match class {
            KeyClass::Server => &SERVER_CURVE,
            KeyClass::Pack => &PACK_CURVE,
        };
        Self::from_constants(constants)
    }

    fn from_constants(constants: &CurveConstants) -> LicenseResult<Self> {
        let curve = Curve::new(
            parse_decimal(constants.p)?,
            parse_decimal(constants.a)?,
            parse_decimal(constants.b)?,
            parse_decimal(constants.n)?,
        );
        let generator = Point::affine(parse_decimal(constants.gx)?, parse_decimal(constants.gy)?);
        let public = Point::affine(parse_decimal(constants.kx)?, parse_decimal(constants.ky)?);

        curve
            .check_on_curve(&generator)
            .map_err(|e| LicenseError::CurveInitialization(format!("generator: {e}")))?;
        curve
            .check_on_curve(&public)
            .map_err(|e| LicenseError::CurveInitialization(format!("public point: {e}")))?;

        Ok(Self {
            curve,
            generator,
            public,
            private_scalar: parse_decimal(constants.private_scalar)?,
        })
    }

    pub(crate) fn curve(&self) -> &Curve {
        &self.curve
    }

    pub(crate) fn generator(&self) -> &Point {
        &self.generator
    }

    pub(crate) fn public(&self) -> &Point {
        &self.public
    }

    pub(crate) fn private_scalar(&self) -> &BigUint {
        &self.private_scalar
    }
}

fn parse_decimal(s: &str) -> LicenseResult<BigUint> {
    BigUint::parse_bytes(s.as_bytes(), 10)
        .ok_or_else(|| LicenseError::CurveInitialization(format!("bad decimal constant {s:?}")))
}
