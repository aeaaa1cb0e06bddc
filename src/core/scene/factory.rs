//=========================================================================
// Scene Factory
//=========================================================================
//
// Instantiates scenes from a name and parameters.
//
// `SceneFactory` is the boundary the manager depends on. `SceneCatalog`
// is the stock implementation: a table of constructors keyed by scene
// class, where the class is `params.scene_class` when set and the scene
// name otherwise.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use super::params::SceneParams;
use super::Scene;
use crate::core::error::{SceneError, SceneResult};

//=== SceneFactory ========================================================

/// Creates scene instances on behalf of the manager.
pub trait SceneFactory: Send {
    fn create_scene(&mut self, name: &str, params: &SceneParams) -> SceneResult<Box<dyn Scene>>;
}

//=== SceneCatalog ========================================================

type Constructor = Box<dyn Fn(&str, &SceneParams) -> SceneResult<Box<dyn Scene>> + Send>;

/// Constructor table keyed by scene class.
///
/// # Examples
///
/// ```rust
/// # use aetheric_stage::prelude::*;
/// struct Menu(String);
///
/// impl Scene for Menu {
///     fn name(&self) -> &str {
///         &self.0
///     }
/// }
///
/// let mut catalog = SceneCatalog::new()
///     .with_scene("menu", |name, _params| Menu(name.to_string()));
///
/// let scene = catalog.create_scene("menu", &SceneParams::new()).unwrap();
/// assert_eq!(scene.name(), "menu");
/// ```
pub struct SceneCatalog {
    constructors: HashMap<String, Constructor>,
    fallback: Option<Constructor>,
}

impl SceneCatalog {
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
            fallback: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers an infallible constructor for `class`.
    pub fn register_scene<S, F>(&mut self, class: impl Into<String>, constructor: F)
    where
        S: Scene + 'static,
        F: Fn(&str, &SceneParams) -> S + Send + 'static,
    {
        self.register(class, move |name: &str, params: &SceneParams| {
            Ok(Box::new(constructor(name, params)) as Box<dyn Scene>)
        });
    }

    /// Registers a fallible constructor for `class`.
    pub fn register<F>(&mut self, class: impl Into<String>, constructor: F)
    where
        F: Fn(&str, &SceneParams) -> SceneResult<Box<dyn Scene>> + Send + 'static,
    {
        let class = class.into();
        if self.constructors.insert(class.clone(), Box::new(constructor)).is_some() {
            debug!(target: "stage", "Scene class '{}' replaced", class);
        }
    }

    /// Builder form of [`Self::register_scene`].
    pub fn with_scene<S, F>(mut self, class: impl Into<String>, constructor: F) -> Self
    where
        S: Scene + 'static,
        F: Fn(&str, &SceneParams) -> S + Send + 'static,
    {
        self.register_scene(class, constructor);
        self
    }

    /// Constructor used when no class matches.
    pub fn with_fallback<F>(mut self, constructor: F) -> Self
    where
        F: Fn(&str, &SceneParams) -> SceneResult<Box<dyn Scene>> + Send + 'static,
    {
        self.fallback = Some(Box::new(constructor));
        self
    }

    //--- Queries ------------------------------------------------------------

    pub fn contains(&self, class: &str) -> bool {
        self.constructors.contains_key(class)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl Default for SceneCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFactory for SceneCatalog {
    fn create_scene(&mut self, name: &str, params: &SceneParams) -> SceneResult<Box<dyn Scene>> {
        let class = params.scene_class.as_deref().unwrap_or(name);

        let constructor = self
            .constructors
            .get(class)
            .or(self.fallback.as_ref())
            .ok_or_else(|| SceneError::UnknownSceneClass(class.to_string()))?;

        debug!(target: "stage", "Creating scene '{}' of class '{}'", name, class);
        constructor(name, params)
    }
}

//=========================================================================
// Tests
//=========================================================================
