use crate::{Error, Result};
use alloc::{
    collections::{BTreeMap, BTreeSet},
    format,
    string::{String, ToString},
    vec::Vec,
};
use evmabi_dyn_abi::{DynSolType, DynSolValue};
use evmabi_primitives::{keccak256, B256};

/// A single `type name` property of a [`TypeDef`], e.g. `address wallet`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PropertyDef {
    /// The property's declared type name, e.g. `"Person"` or `"uint256[]"`.
    #[serde(rename = "type")]
    type_name: String,
    /// The property's name.
    name: String,
}

impl PropertyDef {
    /// Creates a new property definition.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self { type_name: type_name.into(), name: name.into() }
    }

    /// Parses a `"type name"`-form property definition, e.g. `"Person
    /// from"` or `"(bool,uint256) data"`.
    pub fn parse(input: &str) -> Result<Self> {
        let (ty, name) = input
            .rsplit_once(' ')
            .ok_or_else(|| Error::InvalidPropertyDefinition(input.to_string()))?;
        Ok(Self::new(ty.trim(), name.trim()))
    }

    /// The property's declared type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The property's declared type name with any trailing array suffixes
    /// stripped, e.g. `"Person[][3]"` resolves to `"Person"`.
    pub fn root_type_name(&self) -> &str {
        self.type_name.split_once('[').map_or(&self.type_name, |(root, _)| root)
    }

    /// The property's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A single named-type definition: a type name bound to an ordered list of
/// properties, as it appears in an EIP-712 `encodeType` component string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDef {
    type_name: String,
    props: Vec<PropertyDef>,
}

impl TypeDef {
    /// Creates a new type definition.
    pub fn new(type_name: impl Into<String>, props: Vec<PropertyDef>) -> Self {
        Self { type_name: type_name.into(), props }
    }

    /// The type's name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The type's properties, in declaration order.
    pub fn props(&self) -> &[PropertyDef] {
        &self.props
    }

    /// Produces this type's `encodeType` component string, e.g.
    /// `"Person(address wallet,string name)"`.
    pub fn encode_type(&self) -> String {
        let mut out = format!("{}(", self.type_name);
        for (i, prop) in self.props.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(prop.type_name());
            out.push(' ');
            out.push_str(prop.name());
        }
        out.push(')');
        out
    }
}

#[derive(Default)]
struct DfsContext<'a> {
    visited: BTreeSet<&'a str>,
    stack: BTreeSet<&'a str>,
}

/// A dependency graph over named EIP-712 struct types.
///
/// Resolving a type name into a [`DynSolType`] requires first detecting
/// cycles in its property graph (EIP-712 structs cannot reference
/// themselves, directly or indirectly) and then linearizing its
/// dependencies in the order the `encodeType` string requires: the named
/// type first, then its referenced types sorted alphabetically.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    nodes: BTreeMap<String, TypeDef>,
    edges: BTreeMap<String, Vec<String>>,
}

impl Resolver {
    /// Registers a type definition in the graph.
    pub fn ingest(&mut self, type_def: TypeDef) {
        let deps = type_def.props.iter().map(|p| p.root_type_name().to_string()).collect();
        self.edges.insert(type_def.type_name.clone(), deps);
        self.nodes.insert(type_def.type_name.clone(), type_def);
    }

    /// Registers every type in `types`, keyed by type name.
    pub fn ingest_types(&mut self, types: &BTreeMap<String, Vec<PropertyDef>>) {
        for (name, props) in types {
            self.ingest(TypeDef::new(name.clone(), props.clone()));
        }
    }

    fn detect_cycle<'a>(&'a self, type_name: &'a str, ctx: &mut DfsContext<'a>) -> bool {
        let Some(edges) = self.edges.get(type_name) else { return false };
        if ctx.stack.contains(type_name) {
            return true
        }
        if ctx.visited.contains(type_name) {
            return false
        }
        ctx.visited.insert(type_name);
        ctx.stack.insert(type_name);
        if edges.iter().any(|dep| self.detect_cycle(dep, ctx)) {
            return true
        }
        ctx.stack.remove(type_name);
        false
    }

    fn linearize_into<'a>(&'a self, resolution: &mut Vec<&'a TypeDef>, type_name: &str) -> Result<()> {
        if is_elementary(type_name) {
            return Ok(())
        }
        let this_type =
            self.nodes.get(type_name).ok_or_else(|| Error::MissingType(type_name.to_string()))?;
        if resolution.iter().any(|t| t.type_name == this_type.type_name) {
            return Ok(())
        }
        resolution.push(this_type);
        for dep in &self.edges[&this_type.type_name] {
            self.linearize_into(resolution, dep)?;
        }
        Ok(())
    }

    /// Linearizes `type_name`'s dependency graph: the named type first,
    /// then its dependencies in first-encountered order.
    pub fn linearize(&self, type_name: &str) -> Result<Vec<&TypeDef>> {
        if self.detect_cycle(type_name, &mut DfsContext::default()) {
            return Err(Error::CircularDependency(type_name.to_string()))
        }
        let mut resolution = Vec::new();
        self.linearize_into(&mut resolution, type_name)?;
        Ok(resolution)
    }

    /// The EIP-712 `encodeType` string: the named type's component first,
    /// then its referenced types sorted alphabetically by name.
    pub fn encode_type(&self, type_name: &str) -> Result<String> {
        let linear = self.linearize(type_name)?;
        let mut it = linear.iter();
        let first = it.next().ok_or_else(|| Error::MissingType(type_name.to_string()))?.encode_type();
        let mut rest: Vec<String> = it.map(|t| t.encode_type()).collect();
        rest.sort();
        Ok(rest.into_iter().fold(first, |mut acc, s| {
            acc.push_str(&s);
            acc
        }))
    }

    /// `keccak256(encodeType(type_name))`.
    pub fn type_hash(&self, type_name: &str) -> Result<B256> {
        self.encode_type(type_name).map(keccak256)
    }

    /// Resolves `type_name` into a [`DynSolType::Struct`], recursively
    /// resolving every custom-typed property.
    pub fn resolve(&self, type_name: &str) -> Result<DynSolType> {
        if self.detect_cycle(type_name, &mut DfsContext::default()) {
            return Err(Error::CircularDependency(type_name.to_string()))
        }
        self.resolve_type_name(type_name)
    }

    fn resolve_type_name(&self, type_name: &str) -> Result<DynSolType> {
        let (root, arrays) = split_arrays(type_name);
        let mut ty = self.resolve_root(root)?;
        for len in arrays.into_iter().rev() {
            ty = match len {
                Some(n) => DynSolType::FixedArray(alloc::boxed::Box::new(ty), n),
                None => DynSolType::Array(alloc::boxed::Box::new(ty)),
            };
        }
        Ok(ty)
    }

    fn resolve_root(&self, root: &str) -> Result<DynSolType> {
        if let Some(ty) = elementary(root) {
            return Ok(ty)
        }
        let def = self.nodes.get(root).ok_or_else(|| Error::MissingType(root.to_string()))?;
        let prop_names = def.props.iter().map(|p| p.name().to_string()).collect();
        let tuple = def
            .props
            .iter()
            .map(|p| self.resolve_type_name(p.type_name()))
            .collect::<Result<Vec<_>>>()?;
        Ok(DynSolType::Struct { name: def.type_name.clone(), prop_names, tuple })
    }

    /// `hashStruct(value) = keccak256(typeHash(name) ‖ encodeData(value))`.
    ///
    /// `value` must be a [`DynSolValue::Struct`] whose name was previously
    /// [`ingest`](Self::ingest)ed.
    pub fn hash_struct(&self, value: &DynSolValue) -> Result<B256> {
        let DynSolValue::Struct { name, tuple, .. } = value else { return Err(Error::NotAStruct) };
        let mut buf = self.type_hash(name)?.to_vec();
        for field in tuple {
            buf.extend_from_slice(&self.data_word(field)?);
        }
        Ok(keccak256(buf))
    }

    /// The 32-byte `encodeData` word for a single member value, recursing
    /// into nested structs and arrays per EIP-712's `encodeData` rule.
    fn data_word(&self, value: &DynSolValue) -> Result<B256> {
        Ok(match value {
            DynSolValue::Bytes(b) => keccak256(b),
            DynSolValue::String(s) => keccak256(s.as_bytes()),
            DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
                let mut buf = Vec::with_capacity(items.len() * 32);
                for item in items {
                    buf.extend_from_slice(&self.data_word(item)?);
                }
                keccak256(buf)
            }
            DynSolValue::Struct { .. } => self.hash_struct(value)?,
            DynSolValue::Tuple(items) => {
                let mut buf = Vec::with_capacity(items.len() * 32);
                for item in items {
                    buf.extend_from_slice(&self.data_word(item)?);
                }
                keccak256(buf)
            }
            DynSolValue::Address(_)
            | DynSolValue::Bool(_)
            | DynSolValue::Int(..)
            | DynSolValue::Uint(..)
            | DynSolValue::FixedBytes(..) => {
                let word = value.encode_single();
                B256::from_slice(&word)
            }
        })
    }
}

fn split_arrays(type_name: &str) -> (&str, Vec<Option<usize>>) {
    let mut root = type_name;
    let mut suffixes = Vec::new();
    while let Some(rest) = root.strip_suffix(']') {
        match rest.rfind('[') {
            Some(open) => {
                let inner = &rest[open + 1..];
                suffixes.push(inner.parse().ok());
                root = &rest[..open];
            }
            None => break,
        }
    }
    suffixes.reverse();
    (root, suffixes)
}

fn is_elementary(type_name: &str) -> bool {
    let (root, _) = split_arrays(type_name);
    elementary(root).is_some()
}

fn elementary(name: &str) -> Option<DynSolType> {
    DynSolType::parse(name).ok().filter(|t| !matches!(t, DynSolType::Tuple(_)))
}
