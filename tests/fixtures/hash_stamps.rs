// @generated by hashstamp. Do not edit.
#[allow(non_snake_case, non_camel_case_types, non_upper_case_globals, dead_code)]
pub mod hash_stamps {
    #[allow(non_snake_case, non_camel_case_types, non_upper_case_globals, dead_code)]
    pub mod HashStamp_Test {
        pub mod TestClass1 {
            pub const TestMethod1: &str =
                "cabd22eba5326e6ea682047645c36d2a45c2189e2966047d27496c76909dba28";
            pub const r#type: &str =
                "bdb75822c9dad4cb046315bb4bfa44c642cf6303f87fad0c1e85f61f0da70996";
        }
        pub mod TestClass2 {
            pub const Process_int: &str =
                "c6c40cc3242fdd7061a0f1963802ac012b2b1e5e47d7ccc8fd08028567cb5a9a";
            pub const Process_int__string: &str =
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        }
    }
    #[allow(non_snake_case, non_camel_case_types, non_upper_case_globals, dead_code)]
    pub mod Option {
        pub mod Maybe {
            pub const get: &str =
                "cd42404d52ad55ccfa9aca4adc828aa5800ad9d385a0671fbcbf724118320619";
        }
    }
    #[derive(
        ::core::fmt::Debug,
        ::core::clone::Clone,
        ::core::marker::Copy,
        ::core::cmp::PartialEq,
        ::core::cmp::Eq
    )]
    pub struct MemberHash {
        pub name: &'static ::core::primitive::str,
        pub digest: &'static ::core::primitive::str,
        pub signature: &'static ::core::primitive::str,
    }
    #[derive(::core::fmt::Debug, ::core::clone::Clone, ::core::marker::Copy)]
    pub struct TypeHashes {
        pub name: &'static ::core::primitive::str,
        pub members: &'static [MemberHash],
    }
    impl TypeHashes {
        pub fn member(
            &self,
            name: &::core::primitive::str,
        ) -> ::core::option::Option<&'static MemberHash> {
            let members: &'static [MemberHash] = self.members;
            members
                .binary_search_by(|m| m.name.cmp(name))
                .ok()
                .map(|i| &members[i])
        }
    }
    #[derive(::core::fmt::Debug, ::core::clone::Clone, ::core::marker::Copy)]
    pub struct NamespaceHashes {
        pub name: &'static ::core::primitive::str,
        pub types: &'static [TypeHashes],
    }
    impl NamespaceHashes {
        pub fn type_hashes(
            &self,
            name: &::core::primitive::str,
        ) -> ::core::option::Option<&'static TypeHashes> {
            let types: &'static [TypeHashes] = self.types;
            types
                .binary_search_by(|t| t.name.cmp(name))
                .ok()
                .map(|i| &types[i])
        }
    }
    pub static NAMESPACES: &[NamespaceHashes] = &[
        NamespaceHashes {
            name: "HashStamp.Test",
            types: &[
                TypeHashes {
                    name: "TestClass1",
                    members: &[
                        MemberHash {
                            name: "TestMethod1",
                            digest: "cabd22eba5326e6ea682047645c36d2a45c2189e2966047d27496c76909dba28",
                            signature: "TestMethod1()"
                        },
                        MemberHash {
                            name: "type",
                            digest: "bdb75822c9dad4cb046315bb4bfa44c642cf6303f87fad0c1e85f61f0da70996",
                            signature: "type()"
                        }
                    ]
                },
                TypeHashes {
                    name: "TestClass2",
                    members: &[
                        MemberHash {
                            name: "Process_int",
                            digest: "c6c40cc3242fdd7061a0f1963802ac012b2b1e5e47d7ccc8fd08028567cb5a9a",
                            signature: "Process(int)"
                        },
                        MemberHash {
                            name: "Process_int__string",
                            digest: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
                            signature: "Process(int, string)"
                        }
                    ]
                }
            ]
        },
        NamespaceHashes {
            name: "Option",
            types: &[TypeHashes {
                name: "Maybe",
                members: &[MemberHash {
                    name: "get",
                    digest: "cd42404d52ad55ccfa9aca4adc828aa5800ad9d385a0671fbcbf724118320619",
                    signature: "get()"
                }]
            }]
        }
    ];
    pub fn namespace(
        name: &::core::primitive::str,
    ) -> ::core::option::Option<&'static NamespaceHashes> {
        NAMESPACES
            .binary_search_by(|n| n.name.cmp(name))
            .ok()
            .map(|i| &NAMESPACES[i])
    }
    pub fn lookup(
        namespace_name: &::core::primitive::str,
        type_name: &::core::primitive::str,
        member: &::core::primitive::str,
    ) -> ::core::option::Option<&'static MemberHash> {
        namespace(namespace_name)?.type_hashes(type_name)?.member(member)
    }
}
