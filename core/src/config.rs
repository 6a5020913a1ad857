use std::fmt;
use std::rc::Rc;

use crate::distance::Distance;
use crate::graph::SearchGraph;
use crate::store::StoreStrategy;

pub type WeightFn<G> = Rc<dyn Fn(<G as SearchGraph>::Edge) -> <G as SearchGraph>::Weight>;
pub type CompareFn<D> = Rc<dyn Fn(&D, &D) -> bool>;
pub type CombineFn<D> = Rc<dyn Fn(&D, &D) -> D>;

/// Search parameters. Every field has an independent default:
///
/// | field      | default                                   |
/// |------------|-------------------------------------------|
/// | `weight`   | `None`: the graph's intrinsic edge weight |
/// | `compare`  | `a < b`                                   |
/// | `combine`  | `Distance::saturating_combine`            |
/// | `zero`     | `Distance::ZERO`                          |
/// | `infinity` | `Distance::INFINITY`                      |
/// | `store`    | `StoreStrategy::Auto`                     |
///
/// Coherence (zero before infinity, strict compare, dense storage only for
/// bounded graphs) is checked by `SearchState::new`.
pub struct SearchConfig<G: SearchGraph> {
    pub weight: Option<WeightFn<G>>,
    pub compare: CompareFn<G::Weight>,
    pub combine: CombineFn<G::Weight>,
    pub zero: G::Weight,
    pub infinity: G::Weight,
    pub store: StoreStrategy,
}

impl<G: SearchGraph> SearchConfig<G> {
    pub fn new() -> Self {
        Self {
            weight: None,
            compare: Rc::new(|a: &G::Weight, b: &G::Weight| a < b),
            combine: Rc::new(|a: &G::Weight, b: &G::Weight| a.saturating_combine(*b)),
            zero: <G::Weight as Distance>::ZERO,
            infinity: <G::Weight as Distance>::INFINITY,
            store: StoreStrategy::Auto,
        }
    }

    pub fn with_weight(mut self, weight: impl Fn(G::Edge) -> G::Weight + 'static) -> Self {
        self.weight = Some(Rc::new(weight));
        self
    }

    pub fn with_compare(
        mut self,
        compare: impl Fn(&G::Weight, &G::Weight) -> bool + 'static,
    ) -> Self {
        self.compare = Rc::new(compare);
        self
    }

    pub fn with_combine(
        mut self,
        combine: impl Fn(&G::Weight, &G::Weight) -> G::Weight + 'static,
    ) -> Self {
        self.combine = Rc::new(combine);
        self
    }

    pub fn with_zero(mut self, zero: G::Weight) -> Self {
        self.zero = zero;
        self
    }

    pub fn with_infinity(mut self, infinity: G::Weight) -> Self {
        self.infinity = infinity;
        self
    }

    pub fn with_store(mut self, store: StoreStrategy) -> Self {
        self.store = store;
        self
    }
}

impl<G: SearchGraph> Default for SearchConfig<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: SearchGraph> Clone for SearchConfig<G> {
    fn clone(&self) -> Self {
        Self {
            weight: self.weight.clone(),
            compare: Rc::clone(&self.compare),
            combine: Rc::clone(&self.combine),
            zero: self.zero,
            infinity: self.infinity,
            store: self.store,
        }
    }
}

impl<G: SearchGraph> fmt::Debug for SearchConfig<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("weight", &self.weight.as_ref().map(|_| "custom"))
            .field("zero", &self.zero)
            .field("infinity", &self.infinity)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
