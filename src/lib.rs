//! Cadastro de fornecedores por entidade: CRUD autenticado por JWT, filtros por
//! lista de UUIDs ou trecho do nome, e o ciclo de vida "transiente".

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
