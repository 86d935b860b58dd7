//! Property pairs and their classification.
//!
//! A pair is two distinct input properties, named by their letters in the
//! order given (`"Tp"`, `"pT"`). Every pair that maps onto one of the
//! backend's mass-basis input selectors is *known*; known pairs the backend
//! cannot reliably solve are *unsupported*; everything else is *invalid*.

use crate::error::{StateError, StateResult};
use crate::property::Property;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

/// Ordered pair of two distinct input properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyPair {
    first: Property,
    second: Property,
}

impl PropertyPair {
    /// `None` if the properties are equal or either is read-only.
    pub fn new(first: Property, second: Property) -> Option<Self> {
        (first != second && first.is_input() && second.is_input())
            .then_some(Self { first, second })
    }

    pub fn first(self) -> Property {
        self.first
    }

    pub fn second(self) -> Property {
        self.second
    }

    pub fn reversed(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }

    /// Backend selector this pair resolves through, if any.
    pub fn selector(self) -> Option<InputSelector> {
        InputSelector::for_inputs(
            BackendInput::from_property(self.first)?,
            BackendInput::from_property(self.second)?,
        )
        .map(|(selector, _)| selector)
    }

    /// Parse a pair name of exactly two letters.
    ///
    /// A run of valid letters of the wrong length is an arity error; anything
    /// else that is not a pair is an unknown name.
    pub fn parse(name: &str) -> StateResult<Self> {
        let letters: Option<Vec<Property>> = name.chars().map(Property::from_letter).collect();
        let unknown = || StateError::UnknownProperty {
            name: name.to_string(),
        };
        match letters.as_deref() {
            Some([first, second]) => Self::new(*first, *second).ok_or_else(unknown),
            Some(props) if !props.is_empty() => Err(StateError::InvalidArity { count: props.len() }),
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for PropertyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

impl std::str::FromStr for PropertyPair {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Backend input identifiers, in CoolProp's mass-basis naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendInput {
    T,
    P,
    /// Mass density, the reciprocal of specific volume.
    DMass,
    UMass,
    HMass,
    SMass,
    /// Saturation quality.
    Q,
}

impl BackendInput {
    pub fn from_property(property: Property) -> Option<Self> {
        match property {
            Property::T => Some(Self::T),
            Property::P => Some(Self::P),
            Property::V => Some(Self::DMass),
            Property::U => Some(Self::UMass),
            Property::H => Some(Self::HMass),
            Property::S => Some(Self::SMass),
            Property::X => Some(Self::Q),
            Property::Cp | Property::Cv => None,
        }
    }

    /// Key used to order inputs inside a compound selector.
    pub fn key(self) -> &'static str {
        match self {
            Self::T => "T",
            Self::P => "P",
            Self::DMass => "Dmass",
            Self::UMass => "Umass",
            Self::HMass => "Hmass",
            Self::SMass => "Smass",
            Self::Q => "Q",
        }
    }

    /// Convert an SI property magnitude into the backend's input value.
    pub fn value_from_si(self, si: f64) -> f64 {
        match self {
            Self::DMass => 1.0 / si,
            _ => si,
        }
    }
}

/// Compound input selectors of the backend. Each names its two inputs in
/// lexicographic key order, which is also the argument order of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSelector {
    QT,
    PQ,
    QSmass,
    HmassQ,
    DmassQ,
    PT,
    DmassT,
    HmassT,
    SmassT,
    TUmass,
    DmassP,
    HmassP,
    PSmass,
    PUmass,
    HmassSmass,
    SmassUmass,
    DmassHmass,
    DmassSmass,
    DmassUmass,
}

impl InputSelector {
    pub const ALL: [InputSelector; 19] = [
        Self::QT,
        Self::PQ,
        Self::QSmass,
        Self::HmassQ,
        Self::DmassQ,
        Self::PT,
        Self::DmassT,
        Self::HmassT,
        Self::SmassT,
        Self::TUmass,
        Self::DmassP,
        Self::HmassP,
        Self::PSmass,
        Self::PUmass,
        Self::HmassSmass,
        Self::SmassUmass,
        Self::DmassHmass,
        Self::DmassSmass,
        Self::DmassUmass,
    ];

    /// The two inputs, in argument order.
    pub fn inputs(self) -> (BackendInput, BackendInput) {
        use BackendInput::*;
        match self {
            Self::QT => (Q, T),
            Self::PQ => (P, Q),
            Self::QSmass => (Q, SMass),
            Self::HmassQ => (HMass, Q),
            Self::DmassQ => (DMass, Q),
            Self::PT => (P, T),
            Self::DmassT => (DMass, T),
            Self::HmassT => (HMass, T),
            Self::SmassT => (SMass, T),
            Self::TUmass => (T, UMass),
            Self::DmassP => (DMass, P),
            Self::HmassP => (HMass, P),
            Self::PSmass => (P, SMass),
            Self::PUmass => (P, UMass),
            Self::HmassSmass => (HMass, SMass),
            Self::SmassUmass => (SMass, UMass),
            Self::DmassHmass => (DMass, HMass),
            Self::DmassSmass => (DMass, SMass),
            Self::DmassUmass => (DMass, UMass),
        }
    }

    pub fn name(self) -> String {
        let (a, b) = self.inputs();
        format!("{}{}_INPUTS", a.key(), b.key())
    }

    /// Selector for two inputs given in any order. The flag reports whether
    /// the caller's order had to be swapped to match argument order.
    pub fn for_inputs(a: BackendInput, b: BackendInput) -> Option<(Self, bool)> {
        let swapped = a.key() > b.key();
        let ordered = if swapped { (b, a) } else { (a, b) };
        Self::ALL
            .into_iter()
            .find(|selector| selector.inputs() == ordered)
            .map(|selector| (selector, swapped))
    }
}

/// Classification of a candidate pair name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairClass {
    Allowed(PropertyPair),
    Unsupported(PropertyPair),
    Invalid,
}

/// Pairs CoolProp's phase determination cannot resolve reliably.
pub const COOLPROP_UNSUPPORTED: [(Property, Property); 4] = [
    (Property::T, Property::U),
    (Property::T, Property::H),
    (Property::U, Property::S),
    (Property::H, Property::X),
];

/// Static table of known, allowed and unsupported pairs.
#[derive(Debug, Clone)]
pub struct PairRegistry {
    known: BTreeSet<PropertyPair>,
    unsupported: BTreeSet<PropertyPair>,
}

static COOLPROP_REGISTRY: LazyLock<PairRegistry> =
    LazyLock::new(|| PairRegistry::new(&COOLPROP_UNSUPPORTED));

impl PairRegistry {
    /// Build a registry; the unsupported list is closed under reversal.
    pub fn new(unsupported: &[(Property, Property)]) -> Self {
        let mut known = BTreeSet::new();
        for first in Property::INPUTS {
            for second in Property::INPUTS {
                if let Some(pair) = PropertyPair::new(first, second)
                    && pair.selector().is_some()
                {
                    known.insert(pair);
                }
            }
        }

        let unsupported = unsupported
            .iter()
            .filter_map(|&(a, b)| PropertyPair::new(a, b))
            .flat_map(|pair| [pair, pair.reversed()])
            .filter(|pair| known.contains(pair))
            .collect();

        Self { known, unsupported }
    }

    /// Registry for the CoolProp backend.
    pub fn coolprop() -> &'static PairRegistry {
        &COOLPROP_REGISTRY
    }

    pub fn classify_pair(&self, pair: PropertyPair) -> PairClass {
        if self.unsupported.contains(&pair) {
            PairClass::Unsupported(pair)
        } else if self.known.contains(&pair) {
            PairClass::Allowed(pair)
        } else {
            PairClass::Invalid
        }
    }

    pub fn classify(&self, name: &str) -> PairClass {
        match PropertyPair::parse(name) {
            Ok(pair) => self.classify_pair(pair),
            Err(_) => PairClass::Invalid,
        }
    }

    /// Allowed pairs, both orders.
    pub fn allowed(&self) -> impl Iterator<Item = PropertyPair> + '_ {
        self.known.difference(&self.unsupported).copied()
    }

    /// Unsupported pairs, both orders.
    pub fn unsupported(&self) -> impl Iterator<Item = PropertyPair> + '_ {
        self.unsupported.iter().copied()
    }

    /// Allowed and unsupported pairs. Any of these may be read back from a
    /// resolved state.
    pub fn known(&self) -> impl Iterator<Item = PropertyPair> + '_ {
        self.known.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: &str) -> PropertyPair {
        PropertyPair::parse(name).unwrap()
    }

    #[test]
    fn parse_pairs() {
        assert_eq!(pair("Tp").first(), Property::T);
        assert_eq!(pair("Tp").second(), Property::P);
        assert_eq!(pair("pT"), pair("Tp").reversed());
        assert_eq!(pair("vx").to_string(), "vx");
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            PropertyPair::parse("T"),
            Err(StateError::InvalidArity { count: 1 })
        ));
        assert!(matches!(
            PropertyPair::parse("Tpv"),
            Err(StateError::InvalidArity { count: 3 })
        ));
        assert!(matches!(
            PropertyPair::parse("TP"),
            Err(StateError::UnknownProperty { .. })
        ));
        assert!(matches!(
            PropertyPair::parse("TT"),
            Err(StateError::UnknownProperty { .. })
        ));
        assert!(matches!(
            PropertyPair::parse(""),
            Err(StateError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn selectors_are_order_independent() {
        let (a, swapped_a) = InputSelector::for_inputs(BackendInput::T, BackendInput::P).unwrap();
        let (b, swapped_b) = InputSelector::for_inputs(BackendInput::P, BackendInput::T).unwrap();
        assert_eq!(a, InputSelector::PT);
        assert_eq!(a, b);
        assert!(swapped_a);
        assert!(!swapped_b);
        assert_eq!(a.name(), "PT_INPUTS");
        assert_eq!(InputSelector::DmassT.name(), "DmassT_INPUTS");
    }

    #[test]
    fn selector_names_are_sorted() {
        for selector in InputSelector::ALL {
            let (a, b) = selector.inputs();
            assert!(a.key() < b.key(), "{selector:?}");
        }
    }

    #[test]
    fn classification() {
        let registry = PairRegistry::coolprop();
        assert_eq!(registry.classify("Tp"), PairClass::Allowed(pair("Tp")));
        assert_eq!(registry.classify("xT"), PairClass::Allowed(pair("xT")));
        assert_eq!(registry.classify("Tu"), PairClass::Unsupported(pair("Tu")));
        assert_eq!(registry.classify("uT"), PairClass::Unsupported(pair("uT")));
        assert_eq!(registry.classify("xh"), PairClass::Unsupported(pair("xh")));
        assert_eq!(registry.classify("su"), PairClass::Unsupported(pair("su")));
        // no backend selector
        assert_eq!(registry.classify("uh"), PairClass::Invalid);
        assert_eq!(registry.classify("xu"), PairClass::Invalid);
        assert_eq!(registry.classify("TP"), PairClass::Invalid);
        assert_eq!(registry.classify("Tpx"), PairClass::Invalid);
    }

    #[test]
    fn counts() {
        let registry = PairRegistry::coolprop();
        assert_eq!(registry.known().count(), 38);
        assert_eq!(registry.unsupported().count(), 8);
        assert_eq!(registry.allowed().count(), 30);
    }

    #[test]
    fn custom_unsupported_set() {
        let registry = PairRegistry::new(&[]);
        assert_eq!(registry.classify("Tu"), PairClass::Allowed(pair("Tu")));
        assert_eq!(registry.allowed().count(), 38);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn classification_closed_under_reversal(a in 0usize..7, b in 0usize..7) {
                prop_assume!(a != b);
                let pair = PropertyPair::new(Property::INPUTS[a], Property::INPUTS[b]).unwrap();
                let registry = PairRegistry::coolprop();
                let forward = registry.classify_pair(pair);
                let backward = registry.classify_pair(pair.reversed());
                match (forward, backward) {
                    (PairClass::Allowed(_), PairClass::Allowed(_))
                    | (PairClass::Unsupported(_), PairClass::Unsupported(_))
                    | (PairClass::Invalid, PairClass::Invalid) => {}
                    other => prop_assert!(false, "asymmetric classification {other:?}"),
                }
            }
        }
    }
}
