//! Lookup, tag and filter operations over a [`Catalog`].
//!
//! Everything here except the `add_*` family is read-only and can be called
//! concurrently on an unchanging catalog.

use std::collections::BTreeSet;

use log::debug;

use super::fuzzy;
use super::types::error::Result;
use super::types::models::*;

/// Appends `entity` and restores name order.
///
/// Returns the inserted entity. Among equal names it sorts last, since the
/// sort is stable and it was appended last.
fn add_sorted<T: Entry>(items: &mut Vec<T>, entity: T) -> &mut T {
    let key = name_key(entity.name());
    items.push(entity);
    sort_by_name(items);
    let index = items.partition_point(|item| name_key(item.name()) <= key) - 1;
    &mut items[index]
}

fn find_by_name<'a, T: Entry>(items: &'a [T], name: &str) -> Option<&'a T> {
    items.iter().find(|item| item.name() == name)
}

fn with_tag<'a, T: Entry>(items: &'a [T], tag: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.has_label(tag)).collect()
}

/// Name pattern and tag are ANDed; an empty argument does not restrict.
fn filter<'a, T: Entry>(items: &'a [T], pattern: &str, tag: &str) -> Vec<&'a T> {
    let pattern = pattern.to_lowercase();
    let tag = tag.to_lowercase();
    items
        .iter()
        .filter(|item| pattern.is_empty() || fuzzy::matches(&pattern, item.name()))
        .filter(|item| tag.is_empty() || item.has_label(&tag))
        .collect()
}

impl Catalog {
    /// Adds an empty kernel command named `name`.
    ///
    /// Duplicate names are accepted.
    pub fn add_command(&mut self, name: &str) -> Result<&mut Command> {
        debug!("Adding command '{}'", name);
        Ok(add_sorted(&mut self.commands, Command::new(name)))
    }

    pub fn add_environment(&mut self, name: &str) -> Result<&mut Environment> {
        debug!("Adding environment '{}'", name);
        Ok(add_sorted(&mut self.environments, Environment::new(name)))
    }

    pub fn add_package(&mut self, name: &str) -> Result<&mut Package> {
        debug!("Adding package '{}'", name);
        Ok(add_sorted(&mut self.packages, Package::new(name)))
    }

    pub fn add_document_class(&mut self, name: &str) -> Result<&mut DocumentClass> {
        debug!("Adding document class '{}'", name);
        Ok(add_sorted(&mut self.document_classes, DocumentClass::new(name)))
    }

    /// Looks up a command by exact name.
    ///
    /// An empty `package_name` searches the kernel commands; otherwise the
    /// first package with that exact name is searched. A missing package
    /// yields `None` like a missing command.
    pub fn get_command_from_package(
        &self,
        command_name: &str,
        package_name: &str,
    ) -> Option<&Command> {
        let commands = if package_name.is_empty() {
            &self.commands
        } else {
            &self.get_package_with_name(package_name)?.commands
        };
        find_by_name(commands, command_name)
    }

    pub fn get_environment_with_name(&self, name: &str) -> Option<&Environment> {
        find_by_name(&self.environments, name)
    }

    pub fn get_package_with_name(&self, name: &str) -> Option<&Package> {
        find_by_name(&self.packages, name)
    }

    pub fn get_document_class(&self, name: &str) -> Option<&DocumentClass> {
        find_by_name(&self.document_classes, name)
    }

    /// All tags used anywhere in the catalog, sorted and deduplicated.
    pub fn tags(&self) -> Vec<String> {
        let package_commands = self.packages.iter().flat_map(|p| p.commands.iter());
        let labels = self
            .commands
            .iter()
            .chain(package_commands)
            .flat_map(Entry::labels)
            .chain(self.environments.iter().flat_map(Entry::labels))
            .chain(self.packages.iter().flat_map(Entry::labels))
            .chain(self.document_classes.iter().flat_map(Entry::labels));

        labels
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    /// Commands labelled `tag`: kernel commands first, then package commands
    /// in package order.
    pub fn get_commands_with_tag(&self, tag: &str) -> Vec<&Command> {
        let mut found = with_tag(&self.commands, tag);
        for package in &self.packages {
            found.extend(with_tag(&package.commands, tag));
        }
        found
    }

    pub fn get_environments_with_tag(&self, tag: &str) -> Vec<&Environment> {
        with_tag(&self.environments, tag)
    }

    pub fn get_packages_with_tag(&self, tag: &str) -> Vec<&Package> {
        with_tag(&self.packages, tag)
    }

    pub fn get_documentclasses_with_tag(&self, tag: &str) -> Vec<&DocumentClass> {
        with_tag(&self.document_classes, tag)
    }

    /// Kernel commands whose name fuzzy-matches `pattern` and whose labels
    /// contain `tag`, in catalog order.
    pub fn filter_commands(&self, pattern: &str, tag: &str) -> Vec<&Command> {
        filter(&self.commands, pattern, tag)
    }

    pub fn filter_environments(&self, pattern: &str, tag: &str) -> Vec<&Environment> {
        filter(&self.environments, pattern, tag)
    }

    pub fn filter_packages(&self, pattern: &str, tag: &str) -> Vec<&Package> {
        filter(&self.packages, pattern, tag)
    }

    pub fn filter_document_classes(&self, pattern: &str, tag: &str) -> Vec<&DocumentClass> {
        filter(&self.document_classes, pattern, tag)
    }
}

impl Package {
    /// Adds an empty command to this package's own namespace.
    pub fn add_command(&mut self, name: &str) -> Result<&mut Command> {
        debug!("Adding command '{}' to package '{}'", name, self.name);
        Ok(add_sorted(&mut self.commands, Command::new(name)))
    }
}
