//! SimpleDB: `ListDomains`, `GetAttributes`, `Select`.

use super::metadata::ResponseMetadata;
use crate::decode::{generic_error, Operation, XmlCursor, SDB_BASE64};
use crate::error::{DecodeError, InvokeError};
use crate::params::ParameterSet;
use crate::transport::Transport;
use crate::QueryClient;
use serde::Serialize;

pub const LIST_DOMAINS: Operation<ListDomainsResult> =
    Operation::new("ListDomains", reduce_list_domains, generic_error);
pub const GET_ATTRIBUTES: Operation<GetAttributesResult> =
    Operation::transformed("GetAttributes", reduce_get_attributes, generic_error, &SDB_BASE64);
pub const SELECT: Operation<SelectResult> =
    Operation::transformed("Select", reduce_select, generic_error, &SDB_BASE64);

#[derive(Debug, Clone, Default)]
pub struct ListDomainsRequest {
    pub max_number_of_domains: Option<u32>,
    pub next_token: Option<String>,
}

impl ListDomainsRequest {
    pub fn to_params(&self) -> ParameterSet {
        let mut p = ParameterSet::for_action("ListDomains");
        p.insert_opt("MaxNumberOfDomains", self.max_number_of_domains)
            .insert_opt("NextToken", self.next_token.as_deref());
        p
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListDomainsResult {
    pub domain_names: Vec<String>,
    pub next_token: Option<String>,
    pub metadata: ResponseMetadata,
}

fn reduce_list_domains(c: &mut XmlCursor<'_>) -> Result<ListDomainsResult, DecodeError> {
    let mut out = ListDomainsResult::default();
    while c.read()? {
        if c.test_expression("DomainName", 3) {
            out.domain_names.push(c.read_text()?);
        } else if c.test_expression("NextToken", 3) {
            out.next_token = Some(c.read_text()?);
        } else if c.test_expression("ResponseMetadata", 2) {
            out.metadata = ResponseMetadata::reduce(c)?;
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, Default)]
pub struct GetAttributesRequest {
    pub domain_name: String,
    pub item_name: String,
    pub attribute_names: Vec<String>,
    pub consistent_read: Option<bool>,
}

impl GetAttributesRequest {
    pub fn to_params(&self) -> ParameterSet {
        let mut p = ParameterSet::for_action("GetAttributes");
        p.insert("DomainName", self.domain_name.as_str())
            .insert("ItemName", self.item_name.as_str())
            .insert_list("AttributeName", self.attribute_names.iter().map(String::as_str));
        if let Some(consistent) = self.consistent_read {
            p.insert_bool("ConsistentRead", consistent);
        }
        p
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    /// From the `<Attribute>` start tag.
    fn reduce(c: &mut XmlCursor<'_>) -> Result<Self, DecodeError> {
        let depth = c.depth();
        let mut out = Self::default();
        while c.next_in(depth)? {
            if c.test_expression("Name", depth + 1) {
                out.name = c.read_text()?;
            } else if c.test_expression("Value", depth + 1) {
                out.value = c.read_text()?;
            }
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetAttributesResult {
    pub attributes: Vec<Attribute>,
    pub metadata: ResponseMetadata,
}

fn reduce_get_attributes(c: &mut XmlCursor<'_>) -> Result<GetAttributesResult, DecodeError> {
    let mut out = GetAttributesResult::default();
    while c.read()? {
        if c.test_expression("Attribute", 3) {
            out.attributes.push(Attribute::reduce(c)?);
        } else if c.test_expression("ResponseMetadata", 2) {
            out.metadata = ResponseMetadata::reduce(c)?;
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, Default)]
pub struct SelectRequest {
    pub select_expression: String,
    pub next_token: Option<String>,
    pub consistent_read: Option<bool>,
}

impl SelectRequest {
    pub fn to_params(&self) -> ParameterSet {
        let mut p = ParameterSet::for_action("Select");
        p.insert("SelectExpression", self.select_expression.as_str())
            .insert_opt("NextToken", self.next_token.as_deref());
        if let Some(consistent) = self.consistent_read {
            p.insert_bool("ConsistentRead", consistent);
        }
        p
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectResult {
    pub items: Vec<Item>,
    pub next_token: Option<String>,
    pub metadata: ResponseMetadata,
}

fn reduce_select(c: &mut XmlCursor<'_>) -> Result<SelectResult, DecodeError> {
    let mut out = SelectResult::default();
    while c.read()? {
        if c.test_expression("Item", 3) {
            let depth = c.depth();
            let mut item = Item::default();
            while c.next_in(depth)? {
                if c.test_expression("Name", depth + 1) {
                    item.name = c.read_text()?;
                } else if c.test_expression("Attribute", depth + 1) {
                    item.attributes.push(Attribute::reduce(c)?);
                }
            }
            out.items.push(item);
        } else if c.test_expression("NextToken", 3) {
            out.next_token = Some(c.read_text()?);
        } else if c.test_expression("ResponseMetadata", 2) {
            out.metadata = ResponseMetadata::reduce(c)?;
        }
    }
    Ok(out)
}

pub fn list_domains<T: Transport>(
    client: &QueryClient<T>,
    request: &ListDomainsRequest,
) -> Result<ListDomainsResult, InvokeError> {
    client.invoke(&LIST_DOMAINS, request.to_params())
}

pub fn get_attributes<T: Transport>(
    client: &QueryClient<T>,
    request: &GetAttributesRequest,
) -> Result<GetAttributesResult, InvokeError> {
    client.invoke(&GET_ATTRIBUTES, request.to_params())
}

pub fn select<T: Transport>(
    client: &QueryClient<T>,
    request: &SelectRequest,
) -> Result<SelectResult, InvokeError> {
    client.invoke(&SELECT, request.to_params())
}
