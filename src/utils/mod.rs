pub mod variable_naming;
