//! The office schema: teams, their supplies and equipment, users and tweets.

use trellis_core::TypeId;
use trellis_registry::{
    ArgDef, AttrDef, Registry, RegistryBuilder, RegistryError, ScalarType,
};

/// A stored field of an entity.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub scalar: ScalarType,
    pub required: bool,
}

const fn field(name: &'static str, scalar: ScalarType) -> FieldSpec {
    FieldSpec {
        name,
        scalar,
        required: false,
    }
}

const fn required(name: &'static str, scalar: ScalarType) -> FieldSpec {
    FieldSpec {
        name,
        scalar,
        required: true,
    }
}

/// An entity kind of the office schema.
///
/// Resolvers are generic over this trait so that one function serves every
/// kind while the dispatch table still holds plain function pointers.
pub trait Entity {
    /// Type name in the registry.
    const NAME: &'static str;
    /// Identity field and its type.
    const IDENTITY: (&'static str, ScalarType);
    /// Stored fields besides the identity.
    const FIELDS: &'static [FieldSpec];
    /// Query field listing every record.
    const LIST_FIELD: &'static str;
    /// Query field fetching one record by identity.
    const GET_FIELD: &'static str;
    /// Whether the engine may derive identities for this kind.
    const DERIVED: bool = false;
}

pub struct Team;
pub struct Equipment;
pub struct Supply;
pub struct User;
pub struct Tweet;

impl Entity for Team {
    const NAME: &'static str = "Team";
    const IDENTITY: (&'static str, ScalarType) = ("id", ScalarType::Int);
    const FIELDS: &'static [FieldSpec] = &[
        field("manager", ScalarType::String),
        field("office", ScalarType::String),
        field("extension_number", ScalarType::String),
        field("mascot", ScalarType::String),
        field("cleaning_duty", ScalarType::String),
        field("project", ScalarType::String),
    ];
    const LIST_FIELD: &'static str = "teams";
    const GET_FIELD: &'static str = "team";
}

impl Entity for Equipment {
    const NAME: &'static str = "Equipment";
    const IDENTITY: (&'static str, ScalarType) = ("id", ScalarType::String);
    const FIELDS: &'static [FieldSpec] = &[
        field("used_by", ScalarType::String),
        field("count", ScalarType::Int),
        field("new_or_used", ScalarType::String),
    ];
    const LIST_FIELD: &'static str = "equipments";
    const GET_FIELD: &'static str = "equipment";
}

impl Entity for Supply {
    const NAME: &'static str = "Supply";
    const IDENTITY: (&'static str, ScalarType) = ("id", ScalarType::String);
    const FIELDS: &'static [FieldSpec] = &[field("team", ScalarType::Int)];
    const LIST_FIELD: &'static str = "supplies";
    const GET_FIELD: &'static str = "supply";
}

impl Entity for User {
    const NAME: &'static str = "User";
    const IDENTITY: (&'static str, ScalarType) = ("id", ScalarType::Id);
    const FIELDS: &'static [FieldSpec] = &[required("username", ScalarType::String)];
    const LIST_FIELD: &'static str = "users";
    const GET_FIELD: &'static str = "user";
}

impl Entity for Tweet {
    const NAME: &'static str = "Tweet";
    const IDENTITY: (&'static str, ScalarType) = ("id", ScalarType::Id);
    const FIELDS: &'static [FieldSpec] = &[
        required("text", ScalarType::String),
        field("user_id", ScalarType::Id),
    ];
    const LIST_FIELD: &'static str = "allTweets";
    const GET_FIELD: &'static str = "tweet";
    const DERIVED: bool = true;
}

/// Name of the insert mutation for a kind.
pub(crate) fn insert_field<E: Entity>() -> String {
    format!("insert{}", E::NAME)
}

/// Name of the update mutation for a kind.
pub(crate) fn update_field<E: Entity>() -> String {
    format!("update{}", E::NAME)
}

/// Name of the delete mutation for a kind.
pub(crate) fn delete_field<E: Entity>() -> String {
    format!("delete{}", E::NAME)
}

/// Build the office registry.
pub fn office_registry() -> Result<Registry, RegistryError> {
    let mut builder = RegistryBuilder::new();

    declare_type::<Team>(&mut builder)?;
    declare_type::<Equipment>(&mut builder)?;
    declare_type::<Supply>(&mut builder)?;
    declare_type::<User>(&mut builder)?;
    declare_type::<Tweet>(&mut builder)?;

    builder
        .add_relation("Team", "supplies")
        .has_many("Supply", "team")
        .done()?;
    builder
        .add_relation("User", "tweets")
        .has_many("Tweet", "user_id")
        .done()?;
    builder
        .add_relation("Tweet", "author")
        .belongs_to("User", "user_id")
        .done()?;

    declare_crud::<Team>(&mut builder)?;
    declare_crud::<Equipment>(&mut builder)?;
    declare_crud::<Supply>(&mut builder)?;
    declare_crud::<User>(&mut builder)?;
    declare_crud::<Tweet>(&mut builder)?;

    declare_delete::<Team>(&mut builder)?;
    declare_delete::<Equipment>(&mut builder)?;
    declare_delete::<Supply>(&mut builder)?;
    declare_delete::<User>(&mut builder)?;

    builder
        .add_mutation("postTweet")
        .arg(ArgDef::new("text", ScalarType::String).required())
        .arg(ArgDef::new("userId", ScalarType::Id).required())
        .returns_record(Tweet::NAME)
        .done()?;
    // Tweets keep the flag-returning delete
    builder
        .add_mutation(delete_field::<Tweet>())
        .arg(ArgDef::new(Tweet::IDENTITY.0, Tweet::IDENTITY.1).required())
        .returns_bool()
        .done()?;

    builder.build()
}

fn declare_type<E: Entity>(builder: &mut RegistryBuilder) -> Result<TypeId, RegistryError> {
    let (identity, scalar) = E::IDENTITY;
    let mut ty = builder.add_type(E::NAME).identity(identity, scalar);
    if E::DERIVED {
        ty = ty.derived_identity();
    }
    for field in E::FIELDS {
        let mut attr = AttrDef::new(field.name, field.scalar);
        if field.required {
            attr = attr.required();
        }
        ty = ty.attr(attr);
    }
    ty.done()
}

/// Declare the list, get, insert and update root fields of a kind.
fn declare_crud<E: Entity>(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    let (identity, scalar) = E::IDENTITY;

    builder
        .add_query(E::LIST_FIELD)
        .returns_list(E::NAME)
        .done()?;
    builder
        .add_query(E::GET_FIELD)
        .arg(ArgDef::new(identity, scalar).required())
        .returns_record(E::NAME)
        .done()?;

    let mut insert = builder
        .add_mutation(insert_field::<E>())
        .arg(ArgDef::new(identity, scalar).required());
    for field in E::FIELDS {
        let mut arg = ArgDef::new(field.name, field.scalar);
        if field.required {
            arg = arg.required();
        }
        insert = insert.arg(arg);
    }
    insert.returns_record(E::NAME).done()?;

    let mut update = builder
        .add_mutation(update_field::<E>())
        .arg(ArgDef::new(identity, scalar).required());
    for field in E::FIELDS {
        update = update.arg(ArgDef::new(field.name, field.scalar));
    }
    update.returns_record(E::NAME).done()
}

/// Declare the record-returning delete of a kind.
fn declare_delete<E: Entity>(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    let (identity, scalar) = E::IDENTITY;
    builder
        .add_mutation(delete_field::<E>())
        .arg(ArgDef::new(identity, scalar).required())
        .returns_record(E::NAME)
        .done()
}
