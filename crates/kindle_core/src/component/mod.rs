//! Component registry and storage seam.
//!
//! Components form a closed set: [`ComponentKind`] names every kind and
//! [`Component`] carries the typed record for each. Storage itself is a
//! collaborator reached through [`ComponentStore`]; [`ComponentManager`]
//! is the in-memory implementation used by the runtime and tests.

mod collider;
mod node;
mod script;
mod transform;
mod visual;

pub use collider::Collider2DComponent;
pub use node::{NodeComponent, NodeInheritance, NodeType};
pub use script::ScriptComponent;
pub use transform::Transform2DComponent;
pub use visual::{
    Animation, AnimationFrame, AnimatedSpriteComponent, ColorSquareComponent, SpriteComponent,
    TextLabelComponent,
};

use rustc_hash::FxHashMap;

use crate::entity::Entity;

/// Every kind of component an entity may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Node,
    Transform2D,
    Sprite,
    AnimatedSprite,
    TextLabel,
    Script,
    Collider2D,
    ColorSquare,
}

impl ComponentKind {
    pub const COUNT: usize = 8;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Node,
        Self::Transform2D,
        Self::Sprite,
        Self::AnimatedSprite,
        Self::TextLabel,
        Self::Script,
        Self::Collider2D,
        Self::ColorSquare,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A typed component record.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Node(NodeComponent),
    Transform2D(Transform2DComponent),
    Sprite(SpriteComponent),
    AnimatedSprite(AnimatedSpriteComponent),
    TextLabel(TextLabelComponent),
    Script(ScriptComponent),
    Collider2D(Collider2DComponent),
    ColorSquare(ColorSquareComponent),
}

impl Component {
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Node(_) => ComponentKind::Node,
            Self::Transform2D(_) => ComponentKind::Transform2D,
            Self::Sprite(_) => ComponentKind::Sprite,
            Self::AnimatedSprite(_) => ComponentKind::AnimatedSprite,
            Self::TextLabel(_) => ComponentKind::TextLabel,
            Self::Script(_) => ComponentKind::Script,
            Self::Collider2D(_) => ComponentKind::Collider2D,
            Self::ColorSquare(_) => ComponentKind::ColorSquare,
        }
    }

    /// Default record for `kind`, as attached when a node type inherits it.
    #[must_use]
    pub fn default_for(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Node => Self::Node(NodeComponent::default()),
            ComponentKind::Transform2D => Self::Transform2D(Transform2DComponent::default()),
            ComponentKind::Sprite => Self::Sprite(SpriteComponent::default()),
            ComponentKind::AnimatedSprite => {
                Self::AnimatedSprite(AnimatedSpriteComponent::default())
            }
            ComponentKind::TextLabel => Self::TextLabel(TextLabelComponent::default()),
            ComponentKind::Script => Self::Script(ScriptComponent::default()),
            ComponentKind::Collider2D => Self::Collider2D(Collider2DComponent::default()),
            ComponentKind::ColorSquare => Self::ColorSquare(ColorSquareComponent::default()),
        }
    }
}

macro_rules! impl_from_component {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Component {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_component! {
    Node => NodeComponent,
    Transform2D => Transform2DComponent,
    Sprite => SpriteComponent,
    AnimatedSprite => AnimatedSpriteComponent,
    TextLabel => TextLabelComponent,
    Script => ScriptComponent,
    Collider2D => Collider2DComponent,
    ColorSquare => ColorSquareComponent,
}

/// Keyed component storage, indexed by entity and component kind.
pub trait ComponentStore {
    fn get(&self, entity: Entity, kind: ComponentKind) -> Option<&Component>;

    fn get_mut(&mut self, entity: Entity, kind: ComponentKind) -> Option<&mut Component>;

    /// Attaches `component`, replacing any existing record of the same kind.
    fn set(&mut self, entity: Entity, component: Component);

    /// Drops every component attached to `entity`.
    fn remove_all(&mut self, entity: Entity);

    #[inline]
    fn has(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.get(entity, kind).is_some()
    }

    fn node(&self, entity: Entity) -> Option<&NodeComponent> {
        match self.get(entity, ComponentKind::Node) {
            Some(Component::Node(node)) => Some(node),
            _ => None,
        }
    }

    fn transform_2d(&self, entity: Entity) -> Option<&Transform2DComponent> {
        match self.get(entity, ComponentKind::Transform2D) {
            Some(Component::Transform2D(transform)) => Some(transform),
            _ => None,
        }
    }

    fn transform_2d_mut(&mut self, entity: Entity) -> Option<&mut Transform2DComponent> {
        match self.get_mut(entity, ComponentKind::Transform2D) {
            Some(Component::Transform2D(transform)) => Some(transform),
            _ => None,
        }
    }
}

type ComponentSlots = [Option<Component>; ComponentKind::COUNT];

/// In-memory [`ComponentStore`].
#[derive(Debug, Default)]
pub struct ComponentManager {
    entities: FxHashMap<Entity, ComponentSlots>,
}

impl ComponentManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities with at least one component.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Kinds currently attached to `entity`.
    pub fn kinds(&self, entity: Entity) -> impl Iterator<Item = ComponentKind> + '_ {
        self.entities
            .get(&entity)
            .into_iter()
            .flat_map(|slots| slots.iter().flatten().map(Component::kind))
    }
}

impl ComponentStore for ComponentManager {
    fn get(&self, entity: Entity, kind: ComponentKind) -> Option<&Component> {
        self.entities.get(&entity)?[kind.index()].as_ref()
    }

    fn get_mut(&mut self, entity: Entity, kind: ComponentKind) -> Option<&mut Component> {
        self.entities.get_mut(&entity)?[kind.index()].as_mut()
    }

    fn set(&mut self, entity: Entity, component: Component) {
        let index = component.kind().index();
        let slots = self
            .entities
            .entry(entity)
            .or_insert_with(|| std::array::from_fn(|_| None));
        slots[index] = Some(component);
    }

    fn remove_all(&mut self, entity: Entity) {
        self.entities.remove(&entity);
    }
}
